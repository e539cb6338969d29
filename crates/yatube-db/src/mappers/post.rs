//! Joined post row -> PostDetails

use yatube_core::entities::{Group, Post, PostDetails, User};
use yatube_core::value_objects::Snowflake;

use crate::models::PostRow;

impl From<PostRow> for PostDetails {
    fn from(row: PostRow) -> Self {
        let group = match (row.group_id, row.group_title, row.group_slug) {
            (Some(id), Some(title), Some(slug)) => Some(Group {
                id: Snowflake::new(id),
                title,
                slug,
                description: row.group_description.unwrap_or_default(),
            }),
            _ => None,
        };

        PostDetails {
            post: Post {
                id: Snowflake::new(row.id),
                text: row.text,
                author_id: Snowflake::new(row.author_id),
                group_id: group.as_ref().map(|g| g.id),
                image: row.image,
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
            group,
        }
    }
}
