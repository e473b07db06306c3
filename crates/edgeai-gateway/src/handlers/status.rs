//! Health and version endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::GatewayState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `true` when the service answers.
    pub ok: bool,
}

/// Version response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResponse {
    /// Short build identifier, or `"unknown"`.
    pub git_sha: String,
    /// Server time when the response was produced.
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// ```text
/// GET /health
///
/// Response: 200 OK
/// { "ok": true }
/// ```
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { ok: true })
}

/// Version handler.
///
/// ```text
/// GET /version
///
/// Response: 200 OK
/// { "gitSha": "0123456", "timestamp": "2026-01-01T00:00:00Z" }
/// ```
pub async fn version(State(state): State<Arc<GatewayState>>) -> impl IntoResponse {
    Json(VersionResponse {
        git_sha: state.config.short_git_sha(),
        timestamp: Utc::now(),
    })
}
