//! Comment entity

use chrono::{DateTime, Utc};

use super::{Timestamped, User};
use crate::value_objects::Snowflake;

/// Comment on a post
///
/// `post_id` is nullable at the storage level; only comments attached to a
/// post are ever listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Option<Snowflake>,
    pub author_id: Snowflake,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: Snowflake, post_id: Snowflake, author_id: Snowflake, text: String) -> Self {
        Self {
            id,
            post_id: Some(post_id),
            author_id,
            text,
            created_at: Utc::now(),
        }
    }
}

impl Timestamped for Comment {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Comment joined with its author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: User,
}
