//! Session guard middleware
//!
//! Validates the session token on protected routes and exposes the
//! authenticated identity to handlers through request extensions.
//!
//! The `Authorization` header carries the raw token; a `Bearer ` scheme
//! prefix is tolerated and stripped.

use crate::auth::jwt::SessionIdentity;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Authenticated account attached to a request by [`session_guard`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub account_id: i64,
    pub username: String,
}

impl From<SessionIdentity> for AuthUser {
    fn from(identity: SessionIdentity) -> Self {
        Self {
            account_id: identity.account_id,
            username: identity.username,
        }
    }
}

/// Reads the identity placed by the guard. Handlers behind the guard can
/// take `AuthUser` as an argument; anywhere else it rejects with 401.
#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("missing token".to_string()))
    }
}

/// Extract the session token from the `Authorization` header
///
/// Returns `None` when the header is absent, not valid UTF-8, or blank.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim_start();
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then_some(token)
}

/// Middleware for session authentication
///
/// Apply with `axum::middleware::from_fn_with_state` on the protected
/// routes. Rejections short-circuit before any handler runs.
pub async fn session_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(request.headers())
        .ok_or_else(|| ApiError::Unauthorized("missing token".to_string()))?;

    let identity = state.jwt().validate(token).map_err(|e| {
        debug!(error = %e, "Rejected session token");
        ApiError::Unauthorized(e.to_string())
    })?;

    request.extensions_mut().insert(AuthUser::from(identity));

    Ok(next.run(request).await)
}
