//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CommentRequest, CreateGroupRequest, ImageUpload, LoginRequest, LogoutRequest,
    PasswordChangeRequest, PostRequest, RefreshTokenRequest, RegisterRequest, UpdateGroupRequest,
};

pub use responses::{
    AuthResponse, CacheClearResponse, CommentResponse, CurrentUserResponse, FeedResponse,
    FollowResponse, GroupFeedResponse, GroupResponse, HealthChecks, HealthResponse,
    LoginEntryResponse, PageResponse, PostDetailResponse, PostResponse, ProfileResponse,
    ReadinessResponse, UserResponse,
};
