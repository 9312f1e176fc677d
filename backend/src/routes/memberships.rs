//! Membership routes: signup and login
//!
//! Password hashing and verification run on the blocking thread pool inside
//! the membership service.

use crate::error::ApiResult;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use music_catalog_shared::types::{LoginRequest, LoginResponse, SignUpRequest, SignUpResponse};

pub fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/login", post(login))
}

/// POST /memberships/signup
async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> ApiResult<(StatusCode, Json<SignUpResponse>)> {
    state.memberships.sign_up(&req).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "user created successfully".to_string(),
        }),
    ))
}

/// POST /memberships/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let access_token = state.memberships.login(&req).await?;
    Ok(Json(LoginResponse { access_token }))
}
