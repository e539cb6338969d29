//! # yatube-service
//!
//! Application layer: services implementing every use case over the
//! repository traits, request/response DTOs, and post image storage.

pub mod dto;
pub mod media;
pub mod services;

pub use dto::*;
pub use media::{LocalMediaStorage, MediaStorage, MemoryMediaStorage};
pub use services::{
    AuthService, CommentService, FeedService, FollowService, GroupService, HealthService,
    MediaService, PageCacheService, PostService, RenderedPage, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, ServiceSettings, StoredImage, UserService,
};
