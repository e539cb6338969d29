//! Domain entities - core business objects

mod comment;
mod follow;
mod group;
mod post;
mod user;

use chrono::{DateTime, Utc};

pub use comment::{Comment, CommentWithAuthor};
pub use follow::Follow;
pub use group::{Group, MAX_GROUP_TITLE_LEN};
pub use post::{Post, PostDetails, MAX_POST_TEXT_LEN, POST_PREVIEW_LEN};
pub use user::{User, MAX_USERNAME_LEN};

/// Entities that record the moment they were created
///
/// The timestamp is set once at construction and never changes afterwards.
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
}

/// Sort newest-first, breaking ties by ID (which is itself time-ordered)
pub fn sort_newest_first<T, F>(items: &mut [T], id: F)
where
    T: Timestamped,
    F: Fn(&T) -> crate::Snowflake,
{
    items.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| id(b).cmp(&id(a)))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Snowflake;
    use chrono::Duration;

    #[test]
    fn test_sort_newest_first_breaks_ties_by_id() {
        let now = Utc::now();
        let mut posts: Vec<Post> = (1..=3)
            .map(|i| Post::new(Snowflake::new(i), Snowflake::new(100), format!("post {i}"), None))
            .collect();
        posts[0].created_at = now - Duration::seconds(10);
        posts[1].created_at = now;
        posts[2].created_at = now;

        sort_newest_first(&mut posts, |p| p.id);

        let ids: Vec<i64> = posts.iter().map(|p| p.id.into_inner()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
