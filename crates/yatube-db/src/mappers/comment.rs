//! Joined comment row -> CommentWithAuthor

use yatube_core::entities::{Comment, CommentWithAuthor, User};
use yatube_core::value_objects::Snowflake;

use crate::models::CommentRow;

impl From<CommentRow> for CommentWithAuthor {
    fn from(row: CommentRow) -> Self {
        CommentWithAuthor {
            comment: Comment {
                id: Snowflake::new(row.id),
                post_id: row.post_id.map(Snowflake::new),
                author_id: Snowflake::new(row.author_id),
                text: row.text,
                created_at: row.created_at,
            },
            author: User {
                id: Snowflake::new(row.author_id),
                username: row.author_username,
                email: row.author_email,
                first_name: row.author_first_name,
                last_name: row.author_last_name,
                created_at: row.author_created_at,
                updated_at: row.author_updated_at,
            },
        }
    }
}
