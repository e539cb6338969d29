//! Comment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Comment joined with its author
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: i64,
    pub post_id: Option<i64>,
    pub author_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,

    pub author_username: String,
    pub author_email: String,
    pub author_first_name: String,
    pub author_last_name: String,
    pub author_created_at: DateTime<Utc>,
    pub author_updated_at: DateTime<Utc>,
}
