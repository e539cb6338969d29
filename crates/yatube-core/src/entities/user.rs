//! User entity - an account that can author posts and follow other authors

use chrono::{DateTime, Utc};

use super::Timestamped;
use crate::value_objects::Snowflake;

/// Maximum username length
pub const MAX_USERNAME_LEN: usize = 150;

/// Registered account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, username: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            first_name: String::new(),
            last_name: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the display name parts
    #[must_use]
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// "First Last", falling back to the username when both are blank
    pub fn full_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    /// Usernames are letters, digits and `@.+-_`, like the registration form accepts
    pub fn is_valid_username(username: &str) -> bool {
        !username.is_empty()
            && username.chars().count() <= MAX_USERNAME_LEN
            && username
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    }
}

impl Timestamped for User {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(Snowflake::new(1), "leo".to_string(), "leo@example.com".to_string())
    }

    #[test]
    fn test_full_name_falls_back_to_username() {
        assert_eq!(user().full_name(), "leo");
        assert_eq!(user().with_name("Leo", "Tolstoy").full_name(), "Leo Tolstoy");
        assert_eq!(user().with_name("Leo", "").full_name(), "Leo");
    }

    #[test]
    fn test_username_rules() {
        assert!(User::is_valid_username("leo.tolstoy+1@x_y-z"));
        assert!(User::is_valid_username("Лев"));
        assert!(!User::is_valid_username(""));
        assert!(!User::is_valid_username("has space"));
        assert!(!User::is_valid_username("slash/name"));
        assert!(!User::is_valid_username(&"a".repeat(151)));
    }
}
