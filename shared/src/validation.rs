//! Input validation functions
//!
//! Membership input rules shared by the backend and clients. Email syntax is
//! delegated to the `validator` crate.

use thiserror::Error;
use validator::ValidateEmail;

pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_USERNAME_LEN: usize = 50;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("email", "Email cannot be empty"));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::new("email", "Email too long"));
    }
    if !email.validate_email() {
        return Err(ValidationError::new("email", "Invalid email format"));
    }
    Ok(())
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::new("username", "Username cannot be empty"));
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(ValidationError::new("username", "Username too long"));
    }
    Ok(())
}

/// Validate password
///
/// Only presence and an upper bound are enforced; strength rules are left
/// to clients.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::new("password", "Password cannot be empty"));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(ValidationError::new("password", "Password too long"));
    }
    Ok(())
}

/// Validate a full signup form, reporting the first offending field
pub fn validate_signup(email: &str, username: &str, password: &str) -> Result<(), ValidationError> {
    validate_email(email)?;
    validate_username(username)?;
    validate_password(password)
}
