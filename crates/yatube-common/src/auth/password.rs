//! Password hashing (Argon2id) and password rules

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use yatube_core::DomainError;

use crate::error::AppError;

/// Minimum password length in characters
pub const MIN_PASSWORD_LEN: usize = 8;

const COMMON_PASSWORDS: &[&str] = &[
    "password", "password1", "12345678", "123456789", "qwerty123", "qwertyuiop", "iloveyou",
    "sunshine", "princess", "football", "baseball", "welcome1", "admin123", "letmein1",
];

/// Hash a password using Argon2id with a random salt
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(anyhow::anyhow!("password hashing failed: {e}")))
}

/// Check a password against a stored hash
///
/// # Errors
/// Returns an error only if the stored hash is malformed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Reject passwords that are short, all digits, common, or close to the username
///
/// # Errors
/// Returns [`DomainError::WeakPassword`] describing the first failed rule
pub fn validate_password_strength(password: &str, username: &str) -> Result<(), DomainError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::WeakPassword(format!(
            "must contain at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::WeakPassword("must not be entirely numeric".to_string()));
    }

    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        return Err(DomainError::WeakPassword("too common".to_string()));
    }
    let username = username.to_lowercase();
    if !username.is_empty() && (lowered.contains(&username) || username.contains(&lowered)) {
        return Err(DomainError::WeakPassword("too similar to the username".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Correct-Horse-7").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Correct-Horse-7", &hash).unwrap());
        assert!(!verify_password("correct-horse-7", &hash).unwrap());
        assert_ne!(hash, hash_password("Correct-Horse-7").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(verify_password("anything", "not-a-hash").is_err());
    }

    #[test]
    fn test_strength_rules() {
        assert!(validate_password_strength("battery-staple", "leo").is_ok());
        assert!(matches!(
            validate_password_strength("short", "leo"),
            Err(DomainError::WeakPassword(_))
        ));
        assert!(validate_password_strength("1234567890", "leo").is_err());
        assert!(validate_password_strength("Password1", "leo").is_err());
        assert!(validate_password_strength("tolstoy_rules", "Tolstoy").is_err());
    }
}
