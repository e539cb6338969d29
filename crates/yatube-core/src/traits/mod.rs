//! Ports implemented by the infrastructure crates

mod repositories;

pub use repositories::{
    CommentRepository, FollowRepository, GroupRepository, PostRepository, RepoResult,
    UserRepository,
};
