//! Group database model

use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct GroupModel {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}
