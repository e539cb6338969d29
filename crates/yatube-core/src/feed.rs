//! Feed queries - which posts a listing shows
//!
//! A [`FeedQuery`] only describes the selection. Nothing is fetched until a
//! repository is asked to count it or to load one page of it, so the same
//! query can be re-run for any page.

use std::fmt;

use crate::value_objects::Snowflake;

/// Post selection, always ordered newest-first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedQuery {
    /// Every post
    All,
    /// Posts tagged with the group
    Group(Snowflake),
    /// Posts written by the user
    Author(Snowflake),
    /// Posts whose author the user follows
    FollowedBy(Snowflake),
}

impl FeedQuery {
    /// Whether a post with the given author/group belongs in this feed
    ///
    /// `follows` answers "does `user` follow `author`" for the follow feed.
    pub fn matches<F>(&self, author_id: Snowflake, group_id: Option<Snowflake>, follows: F) -> bool
    where
        F: Fn(Snowflake, Snowflake) -> bool,
    {
        match *self {
            Self::All => true,
            Self::Group(id) => group_id == Some(id),
            Self::Author(id) => author_id == id,
            Self::FollowedBy(user) => follows(user, author_id),
        }
    }
}

impl fmt::Display for FeedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Group(id) => write!(f, "group:{id}"),
            Self::Author(id) => write!(f, "author:{id}"),
            Self::FollowedBy(id) => write!(f, "follow:{id}"),
        }
    }
}
