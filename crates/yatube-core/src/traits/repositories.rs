//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; `yatube-db` provides the
//! PostgreSQL and in-memory implementations.

use async_trait::async_trait;

use crate::entities::{Comment, CommentWithAuthor, Follow, Group, Post, PostDetails, User};
use crate::error::DomainError;
use crate::feed::FeedQuery;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user with its password hash
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Delete a user; posts, comments and follow edges go with it
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Group Repository
// ============================================================================

#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Group>>;

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Group>>;

    /// All groups ordered by title
    async fn list(&self) -> RepoResult<Vec<Group>>;

    async fn create(&self, group: &Group) -> RepoResult<()>;

    async fn update(&self, group: &Group) -> RepoResult<()>;

    /// Delete a group; its posts stay, without a group
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post with its author and group
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<PostDetails>>;

    /// Number of posts selected by the query
    async fn count(&self, query: &FeedQuery) -> RepoResult<u64>;

    /// One slice of the query, newest-first
    async fn find_page(
        &self,
        query: &FeedQuery,
        offset: u64,
        limit: u64,
    ) -> RepoResult<Vec<PostDetails>>;

    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Persist text, group and image; `created_at` and author are immutable
    async fn update(&self, post: &Post) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments on a post, oldest-first
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<CommentWithAuthor>>;

    async fn create(&self, comment: &Comment) -> RepoResult<()>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn exists(&self, user_id: Snowflake, author_id: Snowflake) -> RepoResult<bool>;

    /// Insert the edge; returns `false` when it already existed
    async fn create(&self, follow: &Follow) -> RepoResult<bool>;

    /// Remove the edge; returns the number of rows removed
    async fn delete(&self, user_id: Snowflake, author_id: Snowflake) -> RepoResult<u64>;

    /// Authors the user follows
    async fn following(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>>;
}
