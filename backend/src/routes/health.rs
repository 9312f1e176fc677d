//! Health check endpoints
//!
//! - /health - basic health check
//! - /health/ready - readiness probe, checks the database when one is wired
//! - /health/live - liveness probe

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
}

#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    fn new(status: &str, message: Option<String>) -> Self {
        Self {
            status: status.to_string(),
            message,
        }
    }
}

fn respond(status: &str, checks: Option<HealthChecks>) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(respond("healthy", None))
}

/// Returns 503 when the database does not answer
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = match state.db() {
        Some(pool) => match db::health_check(pool).await {
            Ok(()) => CheckStatus::new("healthy", None),
            Err(e) => CheckStatus::new("unhealthy", Some(e.to_string())),
        },
        None => CheckStatus::new("skipped", Some("no database configured".to_string())),
    };

    if database.status == "unhealthy" {
        let response = respond("not_ready", Some(HealthChecks { database }));
        return Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)));
    }

    Ok(Json(respond("ready", Some(HealthChecks { database }))))
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(respond("alive", None))
}
