//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use yatube_core::entities::{Post, PostDetails};
use yatube_core::error::DomainError;
use yatube_core::feed::FeedQuery;
use yatube_core::traits::{PostRepository, RepoResult};
use yatube_core::value_objects::Snowflake;

use crate::models::PostRow;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the WHERE clause selecting the feed's posts (aliased `p`)
fn push_feed_filter(builder: &mut QueryBuilder<'_, Postgres>, query: &FeedQuery) {
    match *query {
        FeedQuery::All => {}
        FeedQuery::Group(group_id) => {
            builder.push(" WHERE p.group_id = ").push_bind(group_id.into_inner());
        }
        FeedQuery::Author(author_id) => {
            builder.push(" WHERE p.author_id = ").push_bind(author_id.into_inner());
        }
        FeedQuery::FollowedBy(user_id) => {
            builder
                .push(" WHERE p.author_id IN (SELECT f.author_id FROM follows f WHERE f.user_id = ")
                .push_bind(user_id.into_inner())
                .push(")");
        }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<PostDetails>> {
        let sql = format!("{} WHERE p.id = $1", PostRow::SELECT);
        let result = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(PostDetails::from))
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &FeedQuery) -> RepoResult<u64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts p");
        push_feed_filter(&mut builder, query);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(count.max(0) as u64)
    }

    #[instrument(skip(self))]
    async fn find_page(
        &self,
        query: &FeedQuery,
        offset: u64,
        limit: u64,
    ) -> RepoResult<Vec<PostDetails>> {
        let mut builder = QueryBuilder::<Postgres>::new(PostRow::SELECT);
        push_feed_filter(&mut builder, query);
        builder
            .push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ")
            .push_bind(limit as i64)
            .push(" OFFSET ")
            .push_bind(offset as i64);

        let rows = builder
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(PostDetails::from).collect())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO posts (id, text, author_id, group_id, image, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.text)
        .bind(post.author_id.into_inner())
        .bind(post.group_id.map(Snowflake::into_inner))
        .bind(post.image.as_deref())
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn update(&self, post: &Post) -> RepoResult<()> {
        let result = sqlx::query("UPDATE posts SET text = $2, group_id = $3, image = $4 WHERE id = $1")
            .bind(post.id.into_inner())
            .bind(&post.text)
            .bind(post.group_id.map(Snowflake::into_inner))
            .bind(post.image.as_deref())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(post.id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql_for(query: &FeedQuery) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts p");
        push_feed_filter(&mut builder, query);
        builder.sql().to_string()
    }

    #[test]
    fn test_feed_filters() {
        assert_eq!(sql_for(&FeedQuery::All), "SELECT COUNT(*) FROM posts p");
        assert!(sql_for(&FeedQuery::Group(Snowflake::new(1))).ends_with("WHERE p.group_id = $1"));
        assert!(sql_for(&FeedQuery::Author(Snowflake::new(1))).ends_with("WHERE p.author_id = $1"));
        assert!(sql_for(&FeedQuery::FollowedBy(Snowflake::new(1)))
            .contains("FROM follows f WHERE f.user_id = $1"));
    }
}
