//! Password hashing for user accounts.
//!
//! Passwords are stored as Argon2id PHC strings. Accounts created without a
//! password get [`UNUSABLE_PASSWORD`], which is not a PHC string and so
//! never verifies.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHasher};

use crate::error::ApiError;

/// Stored in place of a hash for accounts that cannot log in with a password.
pub const UNUSABLE_PASSWORD: &str = "!";

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Unhandled(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Hash `password` if given, otherwise return the unusable marker.
pub fn hash_or_unusable(password: Option<&str>) -> Result<String, ApiError> {
    match password {
        Some(password) => hash_password(password),
        None => Ok(UNUSABLE_PASSWORD.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHash, PasswordVerifier};

    fn verify_password(password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret-pass").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret-pass", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_unusable_password_never_verifies() {
        let hash = hash_or_unusable(None).unwrap();
        assert_eq!(hash, UNUSABLE_PASSWORD);
        assert!(!verify_password("", &hash));
        assert!(!verify_password("!", &hash));
    }
}
