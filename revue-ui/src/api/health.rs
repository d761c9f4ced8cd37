//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub uptime_seconds: i64,
    pub session_loaded: bool,
}

/// GET /health
///
/// Health check endpoint for monitoring; no session required.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let session_loaded = state.session.read().await.is_some();

    Json(HealthResponse {
        status: "ok".to_string(),
        module: "revue-ui".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: (Utc::now() - state.startup_time).num_seconds(),
        session_loaded,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
