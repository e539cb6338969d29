//! PostgreSQL implementation of GroupRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use yatube_core::entities::Group;
use yatube_core::error::DomainError;
use yatube_core::traits::{GroupRepository, RepoResult};
use yatube_core::value_objects::Snowflake;

use crate::models::GroupModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Group>> {
        let result = sqlx::query_as::<_, GroupModel>(
            "SELECT id, title, slug, description FROM groups WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Group::from))
    }

    #[instrument(skip(self))]
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Group>> {
        let result = sqlx::query_as::<_, GroupModel>(
            "SELECT id, title, slug, description FROM groups WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Group::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Group>> {
        let results = sqlx::query_as::<_, GroupModel>(
            "SELECT id, title, slug, description FROM groups ORDER BY title, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Group::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, group: &Group) -> RepoResult<()> {
        sqlx::query("INSERT INTO groups (id, title, slug, description) VALUES ($1, $2, $3, $4)")
            .bind(group.id.into_inner())
            .bind(&group.title)
            .bind(&group.slug)
            .bind(&group.description)
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, |_| DomainError::GroupSlugExists(group.slug.clone())))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, group: &Group) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE groups SET title = $2, slug = $3, description = $4 WHERE id = $1",
        )
        .bind(group.id.into_inner())
        .bind(&group.title)
        .bind(&group.slug)
        .bind(&group.description)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::GroupSlugExists(group.slug.clone())))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::GroupNotFound(group.slug.clone()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // posts.group_id is ON DELETE SET NULL
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::GroupNotFound(id.to_string()));
        }
        Ok(())
    }
}
