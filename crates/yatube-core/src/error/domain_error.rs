//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{Snowflake, SlugError};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid slug: {0}")]
    InvalidSlug(#[from] SlugError),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Text must not be empty")]
    EmptyText,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Image too large: max {max_bytes} bytes")]
    ImageTooLarge { max_bytes: usize },

    // =========================================================================
    // Authentication / Authorization Errors
    // =========================================================================
    #[error("Login required")]
    LoginRequired,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not post author")]
    NotPostAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Group slug already in use: {0}")]
    GroupSlugExists(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::GroupNotFound(_) => "UNKNOWN_GROUP",
            Self::PostNotFound(_) => "UNKNOWN_POST",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::InvalidSlug(_) => "INVALID_SLUG",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::EmptyText => "EMPTY_TEXT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::InvalidImage(_) => "INVALID_IMAGE",
            Self::ImageTooLarge { .. } => "IMAGE_TOO_LARGE",

            Self::LoginRequired => "LOGIN_REQUIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NotPostAuthor => "NOT_POST_AUTHOR",

            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::GroupSlugExists(_) => "GROUP_SLUG_EXISTS",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::GroupNotFound(_) | Self::PostNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidUsername(_)
                | Self::InvalidSlug(_)
                | Self::WeakPassword(_)
                | Self::EmptyText
                | Self::ContentTooLong { .. }
                | Self::InvalidImage(_)
                | Self::ImageTooLarge { .. }
        )
    }

    /// Check if the actor must log in (or log in again) first
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::LoginRequired | Self::InvalidCredentials)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotPostAuthor)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameAlreadyExists | Self::EmailAlreadyExists | Self::GroupSlugExists(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::UserNotFound("leo".into()).code(), "UNKNOWN_USER");
        assert_eq!(DomainError::PostNotFound(Snowflake::new(1)).code(), "UNKNOWN_POST");
        assert_eq!(DomainError::LoginRequired.code(), "LOGIN_REQUIRED");
    }

    #[test]
    fn test_categories() {
        assert!(DomainError::GroupNotFound("cats".into()).is_not_found());
        assert!(DomainError::NotPostAuthor.is_authorization());
        assert!(!DomainError::NotPostAuthor.is_authentication());
        assert!(DomainError::LoginRequired.is_authentication());
        assert!(DomainError::EmptyText.is_validation());
        assert!(DomainError::GroupSlugExists("cats".into()).is_conflict());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
    }

    #[test]
    fn test_slug_error_converts() {
        let err: DomainError = SlugError::Empty.into();
        assert_eq!(err.code(), "INVALID_SLUG");
        assert_eq!(err.to_string(), "Invalid slug: slug must not be empty");
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::PostNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "Post not found: 123");
    }
}
