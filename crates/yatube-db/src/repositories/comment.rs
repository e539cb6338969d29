//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use yatube_core::entities::{Comment, CommentWithAuthor};
use yatube_core::traits::{CommentRepository, RepoResult};
use yatube_core::value_objects::Snowflake;

use crate::models::CommentRow;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<CommentWithAuthor>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r"
            SELECT c.id, c.post_id, c.author_id, c.text, c.created_at,
                   u.username AS author_username, u.email AS author_email,
                   u.first_name AS author_first_name, u.last_name AS author_last_name,
                   u.created_at AS author_created_at, u.updated_at AS author_updated_at
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.post_id = $1
            ORDER BY c.created_at, c.id
            ",
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(CommentWithAuthor::from).collect())
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO comments (id, post_id, author_id, text, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(comment.id.into_inner())
        .bind(comment.post_id.map(Snowflake::into_inner))
        .bind(comment.author_id.into_inner())
        .bind(&comment.text)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
