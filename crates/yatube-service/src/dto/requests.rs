//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;
use yatube_core::Snowflake;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: String,
}

/// Login with username and password
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Logout request (optional refresh token to revoke)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordChangeRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub new_password: String,
}

// ============================================================================
// Post Requests
// ============================================================================

/// Base64-encoded image attached to a post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ImageUpload {
    #[validate(length(min = 1, max = 255, message = "Filename must be 1-255 characters"))]
    pub filename: String,

    /// Base64 content, optionally as a `data:` URL
    #[validate(length(min = 1, message = "Image data is required"))]
    pub data: String,
}

/// Create or edit a post
///
/// On edit, `group_id` replaces the current group (absent clears it) and an
/// absent `image` keeps the current one.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostRequest {
    #[validate(length(min = 1, max = 10000, message = "Text must be 1-10000 characters"))]
    pub text: String,

    #[serde(default)]
    pub group_id: Option<Snowflake>,

    #[serde(default)]
    #[validate(nested)]
    pub image: Option<ImageUpload>,
}

impl PostRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            group_id: None,
            image: None,
        }
    }

    pub fn in_group(mut self, group_id: Snowflake) -> Self {
        self.group_id = Some(group_id);
        self
    }
}

// ============================================================================
// Comment Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, max = 10000, message = "Text must be 1-10000 characters"))]
    pub text: String,
}

// ============================================================================
// Group Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 50, message = "Slug must be 1-50 characters"))]
    pub slug: String,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGroupRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Slug must be 1-50 characters"))]
    pub slug: Option<String>,

    pub description: Option<String>,
}
