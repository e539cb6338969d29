//! Post entity - a text entry with optional group and image

use chrono::{DateTime, Utc};

use super::{Group, Timestamped, User};
use crate::value_objects::Snowflake;

/// Number of characters a post contributes to its short representation
pub const POST_PREVIEW_LEN: usize = 15;

/// Maximum post text length in characters
pub const MAX_POST_TEXT_LEN: usize = 10_000;

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub text: String,
    pub author_id: Snowflake,
    pub group_id: Option<Snowflake>,
    /// Path relative to the media root, e.g. `posts/cat.png`
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new Post
    pub fn new(id: Snowflake, author_id: Snowflake, text: String, group_id: Option<Snowflake>) -> Self {
        Self {
            id,
            text,
            author_id,
            group_id,
            image: None,
            created_at: Utc::now(),
        }
    }

    /// Replace text and group; `created_at` is never touched
    pub fn edit(&mut self, text: String, group_id: Option<Snowflake>) {
        self.text = text;
        self.group_id = group_id;
    }

    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image;
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// First [`POST_PREVIEW_LEN`] characters of the text
    pub fn preview(&self) -> &str {
        match self.text.char_indices().nth(POST_PREVIEW_LEN) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }
}

impl Timestamped for Post {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl std::fmt::Display for Post {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.preview())
    }
}

/// A post joined with its author and group, as every feed lists it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetails {
    pub post: Post,
    pub author: User,
    pub group: Option<Group>,
}

impl Timestamped for PostDetails {
    fn created_at(&self) -> DateTime<Utc> {
        self.post.created_at
    }
}
