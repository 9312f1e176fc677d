//! Session token issuing and validation
//!
//! Session tokens are HS256 JWTs asserting the account id (`sub`), the
//! username, and the issue/expiry instants. They are never persisted; a
//! token is accepted iff its signature matches the service secret and the
//! current time is strictly before `exp`.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Identity asserted by a valid session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub account_id: i64,
    pub username: String,
}

/// Session token failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token expired")]
    Expired,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for session token operations
///
/// Keys are derived once from the configured secret and shared behind
/// `Arc`, so cloning the service is cheap.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    access_token_expiry_secs: i64,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    pub fn new(secret: &str, access_token_expiry_secs: i64) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            access_token_expiry_secs,
        }
    }

    /// Issue a session token for an account
    #[inline]
    pub fn issue(&self, account_id: i64, username: &str) -> Result<String, TokenError> {
        self.issue_at(account_id, username, Utc::now().timestamp())
    }

    /// Issue a session token as if the current time were `now` (Unix seconds)
    pub fn issue_at(&self, account_id: i64, username: &str, now: i64) -> Result<String, TokenError> {
        let claims = Claims {
            sub: account_id.to_string(),
            username: username.to_string(),
            iat: now,
            exp: now + self.access_token_expiry_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, self.keys.encoding())
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Validate a session token against the current time
    #[inline]
    pub fn validate(&self, token: &str) -> Result<SessionIdentity, TokenError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate a session token as if the current time were `now` (Unix seconds)
    pub fn validate_at(&self, token: &str, now: i64) -> Result<SessionIdentity, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against `now` below, without leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, self.keys.decoding(), &validation)?.claims;

        if now >= claims.exp {
            return Err(TokenError::Expired);
        }

        let account_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| TokenError::Malformed("subject is not an account id".to_string()))?;

        Ok(SessionIdentity {
            account_id,
            username: claims.username,
        })
    }

    /// Get session token lifetime in seconds
    #[inline]
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_token_expiry_secs
    }
}
