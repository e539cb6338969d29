//! # yatube-core
//!
//! Domain layer: entities, feed queries, pagination, authorization rules,
//! referential-integrity rules and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod feed;
pub mod integrity;
pub mod pagination;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, CommentWithAuthor, Follow, Group, Post, PostDetails, Timestamped, User,
    sort_newest_first,
};
pub use error::DomainError;
pub use feed::FeedQuery;
pub use integrity::{EntityKind, ForeignKey, OnDelete};
pub use pagination::{Page, PageWindow, Paginator};
pub use policy::{Actor, FollowDecision};
pub use traits::{
    CommentRepository, FollowRepository, GroupRepository, PostRepository, RepoResult,
    UserRepository,
};
pub use value_objects::{Slug, SlugError, Snowflake, SnowflakeGenerator, SnowflakeParseError};
