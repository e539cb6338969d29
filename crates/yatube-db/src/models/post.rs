//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Post joined with its author and (optional) group
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: i64,
    pub text: String,
    pub author_id: i64,
    pub group_id: Option<i64>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,

    pub author_username: String,
    pub author_email: String,
    pub author_first_name: String,
    pub author_last_name: String,
    pub author_created_at: DateTime<Utc>,
    pub author_updated_at: DateTime<Utc>,

    pub group_title: Option<String>,
    pub group_slug: Option<String>,
    pub group_description: Option<String>,
}

impl PostRow {
    /// Column list matching this struct, over `posts p`, `users u` and `groups g`
    pub const SELECT: &'static str = r"
        SELECT p.id, p.text, p.author_id, p.group_id, p.image, p.created_at,
               u.username AS author_username, u.email AS author_email,
               u.first_name AS author_first_name, u.last_name AS author_last_name,
               u.created_at AS author_created_at, u.updated_at AS author_updated_at,
               g.title AS group_title, g.slug AS group_slug, g.description AS group_description
        FROM posts p
        JOIN users u ON u.id = p.author_id
        LEFT JOIN groups g ON g.id = p.group_id
    ";
}
