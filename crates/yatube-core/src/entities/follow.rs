//! Follow entity - a directed "user follows author" edge

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Follow {
    pub id: Snowflake,
    /// The follower
    pub user_id: Snowflake,
    /// The followed author
    pub author_id: Snowflake,
}

impl Follow {
    pub fn new(id: Snowflake, user_id: Snowflake, author_id: Snowflake) -> Self {
        Self {
            id,
            user_id,
            author_id,
        }
    }

    #[inline]
    pub fn is_self_follow(&self) -> bool {
        self.user_id == self.author_id
    }
}
