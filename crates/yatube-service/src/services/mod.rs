//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] for one call and takes the
//! acting user as an [`yatube_core::Actor`] where the rules depend on it.

pub mod auth;
pub mod cache;
pub mod comment;
pub mod context;
pub mod error;
pub mod feed;
pub mod follow;
pub mod group;
pub mod health;
pub mod media;
pub mod post;
pub mod user;

pub use auth::AuthService;
pub use cache::{PageCacheService, RenderedPage};
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use error::{ServiceError, ServiceResult};
pub use feed::FeedService;
pub use follow::FollowService;
pub use group::GroupService;
pub use health::HealthService;
pub use media::{MediaService, StoredImage};
pub use post::PostService;
pub use user::UserService;
