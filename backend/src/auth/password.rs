//! Password hashing using argon2
//!
//! New hashes are Argon2id PHC strings. Accounts imported from the legacy
//! store carry bcrypt hashes (`$2a$`, `$2b$`, `$2y$`); those are still
//! verified so their owners can log in.
//!
//! # Performance Considerations
//!
//! Both algorithms are intentionally CPU-intensive. Async callers should use
//! the `*_async` variants, which run on the blocking thread pool.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Password hashing failures
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Salt generation or hashing itself failed
    #[error("failed to hash password: {0}")]
    Hashing(String),

    /// The plaintext does not match the stored hash
    #[error("credentials do not match")]
    Mismatch,
}

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using Argon2id with a random salt (blocking operation)
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(password: String) -> Result<String, PasswordError> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| PasswordError::Hashing(format!("task join error: {}", e)))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// A stored value that cannot be parsed as a hash never matches.
    pub fn verify(password: &str, hash: &str) -> Result<(), PasswordError> {
        if BCRYPT_PREFIXES.iter().any(|p| hash.starts_with(p)) {
            return match bcrypt::verify(password, hash) {
                Ok(true) => Ok(()),
                _ => Err(PasswordError::Mismatch),
            };
        }

        let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::Mismatch)?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| PasswordError::Mismatch)
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<(), PasswordError> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| PasswordError::Hashing(format!("task join error: {}", e)))?
    }
}
