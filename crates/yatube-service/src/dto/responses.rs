//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// One page of a listing with its position in the whole set
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub total: u64,
    pub per_page: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

/// Body of `GET /auth/login`, the target of login redirects
#[derive(Debug, Clone, Serialize)]
pub struct LoginEntryResponse {
    pub message: String,
    pub method: &'static str,
    pub endpoint: &'static str,
    pub fields: [&'static str; 2],
}

impl Default for LoginEntryResponse {
    fn default() -> Self {
        Self {
            message: "Authentication required. Log in to obtain a bearer token.".to_string(),
            method: "POST",
            endpoint: "/auth/login",
            fields: ["username", "password"],
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user profile
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
}

/// The logged-in user, including private fields
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Group / Post / Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub text: String,
    pub author: UserResponse,
    pub group: Option<GroupResponse>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author: UserResponse,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// `GET /posts/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    /// All posts by the post's author
    pub author_posts_count: u64,
    /// Oldest first
    pub comments: Vec<CommentResponse>,
    /// Whether the viewer follows the author; `false` for anonymous viewers
    pub following: bool,
}

// ============================================================================
// Feed Responses
// ============================================================================

pub type FeedResponse = PageResponse<PostResponse>;

#[derive(Debug, Clone, Serialize)]
pub struct GroupFeedResponse {
    pub group: GroupResponse,
    pub page: FeedResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub author: UserResponse,
    pub posts_count: u64,
    pub following: bool,
    pub page: FeedResponse,
}

/// Follow relation after a follow/unfollow request
#[derive(Debug, Clone, Serialize)]
pub struct FollowResponse {
    pub author: String,
    pub following: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheClearResponse {
    pub cleared: u64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub cache: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, cache_healthy: bool) -> Self {
        let status = |ok: bool| if ok { "healthy" } else { "unhealthy" }.to_string();
        Self {
            status: if database_healthy && cache_healthy {
                "ready"
            } else {
                "not_ready"
            }
            .to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: status(database_healthy),
                cache: status(cache_healthy),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
