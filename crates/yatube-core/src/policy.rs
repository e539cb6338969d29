//! Authorization rules
//!
//! Decides whether an actor may perform an action. Checks never touch
//! storage; callers load what the rules need and pass it in.

use crate::entities::Post;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Who is making the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    User(Snowflake),
}

impl Actor {
    pub fn user_id(&self) -> Option<Snowflake> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }

    /// Identity of a logged-in actor, or [`DomainError::LoginRequired`]
    pub fn require_authenticated(&self) -> Result<Snowflake, DomainError> {
        self.user_id().ok_or(DomainError::LoginRequired)
    }
}

impl From<Option<Snowflake>> for Actor {
    fn from(id: Option<Snowflake>) -> Self {
        id.map_or(Self::Anonymous, Self::User)
    }
}

/// Only the author may edit a post
///
/// Callers check authentication and existence first, so the order of
/// failures is login required, then not found, then forbidden.
pub fn authorize_post_edit(user_id: Snowflake, post: &Post) -> Result<(), DomainError> {
    if post.is_authored_by(user_id) {
        Ok(())
    } else {
        Err(DomainError::NotPostAuthor)
    }
}

/// Outcome of a follow request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowDecision {
    /// Store a new edge
    Create,
    /// Edge exists; nothing to do
    AlreadyFollowing,
    /// Following yourself is silently ignored
    SelfFollow,
}

pub fn decide_follow(user_id: Snowflake, author_id: Snowflake, already_following: bool) -> FollowDecision {
    if user_id == author_id {
        FollowDecision::SelfFollow
    } else if already_following {
        FollowDecision::AlreadyFollowing
    } else {
        FollowDecision::Create
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTHOR: Snowflake = Snowflake::new(1);
    const OTHER: Snowflake = Snowflake::new(2);

    #[test]
    fn test_require_authenticated() {
        assert!(matches!(
            Actor::Anonymous.require_authenticated(),
            Err(DomainError::LoginRequired)
        ));
        assert_eq!(Actor::User(AUTHOR).require_authenticated().unwrap(), AUTHOR);
        assert_eq!(Actor::from(None), Actor::Anonymous);
        assert_eq!(Actor::from(Some(OTHER)), Actor::User(OTHER));
    }

    #[test]
    fn test_only_author_may_edit() {
        let post = Post::new(Snowflake::new(10), AUTHOR, "text".to_string(), None);
        assert!(authorize_post_edit(AUTHOR, &post).is_ok());
        assert!(matches!(
            authorize_post_edit(OTHER, &post),
            Err(DomainError::NotPostAuthor)
        ));
    }

    #[test]
    fn test_follow_decisions() {
        assert_eq!(decide_follow(OTHER, AUTHOR, false), FollowDecision::Create);
        assert_eq!(decide_follow(OTHER, AUTHOR, true), FollowDecision::AlreadyFollowing);
        assert_eq!(decide_follow(AUTHOR, AUTHOR, false), FollowDecision::SelfFollow);
    }
}
