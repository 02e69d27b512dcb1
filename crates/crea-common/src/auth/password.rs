//! Password hashing and strength rules
//!
//! Argon2id with per-hash random salts.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use crea_core::DomainError;

use crate::error::AppError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored hash
///
/// # Errors
/// Returns an error if the stored hash is malformed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Runs one verification against a throwaway hash.
///
/// Login calls this for unknown emails so response time does not reveal
/// whether an account exists.
pub fn equalize_verification_time(password: &str) {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();
    let hash = DUMMY_HASH.get_or_init(|| hash_password("Dummy-Passw0rd").ok());
    if let Some(hash) = hash {
        let _ = verify_password(password, hash);
    }
}

/// Enforce the portal password policy
///
/// At least 8 characters with an uppercase letter, a lowercase letter and a digit.
///
/// # Errors
/// Returns `DomainError::WeakPassword` naming the first unmet rule
pub fn validate_password_strength(password: &str) -> Result<(), DomainError> {
    let rule = if password.chars().count() < MIN_PASSWORD_LEN {
        Some("must be at least 8 characters long")
    } else if !password.chars().any(char::is_uppercase) {
        Some("must contain an uppercase letter")
    } else if !password.chars().any(char::is_lowercase) {
        Some("must contain a lowercase letter")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("must contain a digit")
    } else {
        None
    };

    match rule {
        Some(rule) => Err(DomainError::WeakPassword(format!("password {rule}"))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Railway2026").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Railway2026", &hash).unwrap());
        assert!(!verify_password("railway2026", &hash).unwrap());
        assert_ne!(hash, hash_password("Railway2026").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("x", "not-a-hash").is_err());
    }

    #[test]
    fn test_equalize_verification_time_does_not_panic() {
        equalize_verification_time("anything");
        equalize_verification_time("");
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password_strength("Abcdefg1").is_ok());
        assert!(validate_password_strength("SecurePass1").is_ok());

        let message = |p: &str| validate_password_strength(p).unwrap_err().to_string();
        assert!(message("Ab1").contains("8 characters"));
        assert!(message("lowercase123").contains("uppercase"));
        assert!(message("UPPERCASE123").contains("lowercase"));
        assert!(message("NoDigitsHere").contains("digit"));
        assert_eq!(
            validate_password_strength("short").unwrap_err().code(),
            "WEAK_PASSWORD"
        );
    }
}
