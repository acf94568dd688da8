//! One-way password hashing consumed by user creation
//!
//! The plaintext credential never reaches the store; `UserController::create`
//! hashes it through this trait first.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};

use crate::core::error::{AppError, AppResult};

/// One-way credential hashing
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password
    fn hash(&self, password: &str) -> AppResult<String>;

    /// Verify a plaintext password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> AppResult<bool>;
}

/// Argon2id implementation of [`PasswordHasher`]
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Database(format!("password hashing failed: {e}")))
    }

    fn verify(&self, password: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::Validation(format!("malformed password hash: {e}")))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("correct horse battery staple").unwrap();

        assert_ne!(hash, "correct horse battery staple");
        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("correct horse battery staple", &hash).unwrap());
        assert!(!hasher.verify("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = Argon2Hasher::new();
        let first = hasher.hash("same input").unwrap();
        let second = hasher.hash("same input").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_rejected() {
        let hasher = Argon2Hasher::new();
        assert!(matches!(
            hasher.verify("anything", "not a phc string"),
            Err(AppError::Validation(_))
        ));
    }
}
