//! Error mapping for repositories

use sqlx::Error as SqlxError;
use yatube_core::error::DomainError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a unique violation through `on_unique`, which receives the constraint name
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    map_db_error(e)
}

/// Self-follow hits the `follows_no_self_follow` CHECK constraint
pub fn map_follow_error(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_check_violation() {
            return DomainError::ValidationError("cannot follow yourself".to_string());
        }
        if db_err.is_foreign_key_violation() {
            return DomainError::UserNotFound("follow target".to_string());
        }
    }
    map_db_error(e)
}
