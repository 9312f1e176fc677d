//! Membership service: account signup and login
//!
//! # Performance Optimizations
//!
//! - Password hashing/verification runs on blocking thread pool
//! - JWT service holds pre-computed keys

use crate::auth::{JwtService, PasswordError, PasswordService, TokenError};
use crate::repositories::{AccountDirectory, DirectoryError, NewAccount};
use music_catalog_shared::types::{LoginRequest, SignUpRequest};
use music_catalog_shared::validation::{validate_signup, ValidationError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Membership failures
#[derive(Debug, Error)]
pub enum MembershipError {
    #[error("email or username already exists")]
    AlreadyExists,

    /// Unknown email and wrong password are deliberately indistinguishable
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("failed to hash password: {0}")]
    Hashing(String),

    #[error(transparent)]
    Directory(DirectoryError),

    #[error("session token error: {0}")]
    Token(#[from] TokenError),
}

/// Orchestrates signup and login against an account directory
#[derive(Clone)]
pub struct MembershipService {
    directory: Arc<dyn AccountDirectory>,
    jwt: JwtService,
}

impl MembershipService {
    pub fn new(directory: Arc<dyn AccountDirectory>, jwt: JwtService) -> Self {
        Self { directory, jwt }
    }

    /// Register a new account
    ///
    /// Nothing is persisted when the email or username is already taken.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<(), MembershipError> {
        validate_signup(&request.email, &request.username, &request.password)?;

        let existing = self
            .directory
            .find_by_email_or_username(&request.email, &request.username)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to look up existing account");
                MembershipError::Directory(e)
            })?;

        if existing.is_some() {
            return Err(MembershipError::AlreadyExists);
        }

        // Hash password on blocking thread pool (CPU-intensive)
        let password_hash = PasswordService::hash_async(request.password.clone())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to hash password");
                MembershipError::Hashing(e.to_string())
            })?;

        let account = NewAccount {
            email: request.email.clone(),
            username: request.username.clone(),
            password_hash,
            created_by: request.email.clone(),
            updated_by: request.email.clone(),
        };

        match self.directory.create(account).await {
            Ok(record) => {
                info!(account_id = record.id, "Account created");
                Ok(())
            }
            // Lost a race with a concurrent signup for the same identity
            Err(DirectoryError::Duplicate) => Err(MembershipError::AlreadyExists),
            Err(e) => {
                error!(error = %e, "Failed to create account");
                Err(MembershipError::Directory(e))
            }
        }
    }

    /// Authenticate with email and password, returning a session token
    pub async fn login(&self, request: &LoginRequest) -> Result<String, MembershipError> {
        let account = self
            .directory
            .find_by_email(&request.email)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to look up account");
                MembershipError::Directory(e)
            })?
            .ok_or(MembershipError::InvalidCredentials)?;

        // Verify password on blocking thread pool (CPU-intensive)
        PasswordService::verify_async(request.password.clone(), account.password_hash.clone())
            .await
            .map_err(|e| match e {
                PasswordError::Mismatch => MembershipError::InvalidCredentials,
                PasswordError::Hashing(msg) => MembershipError::Hashing(msg),
            })?;

        let token = self.jwt.issue(account.id, &account.username).map_err(|e| {
            error!(error = %e, "Failed to issue session token");
            MembershipError::Token(e)
        })?;

        info!(account_id = account.id, "Login succeeded");
        Ok(token)
    }
}
