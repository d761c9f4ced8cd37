//! revue-ui library interface
//!
//! Exposes the application state and router for integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use crate::models::ReviewSession;
use crate::services::ScoreClient;
use axum::Router;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Review CSV source resolved at startup
    pub dataset_path: PathBuf,
    /// Scoring service collaborator (injected; tests substitute a double)
    pub score_client: Arc<dyn ScoreClient>,
    /// Current review session; replaced wholesale on reload
    pub session: Arc<RwLock<Option<ReviewSession>>>,
    /// Run gate serializing annotation runs (second trigger gets 409)
    pub annotate_gate: Arc<Mutex<()>>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(dataset_path: PathBuf, score_client: Arc<dyn ScoreClient>) -> Self {
        Self {
            dataset_path,
            score_client,
            session: Arc::new(RwLock::new(None)),
            annotate_gate: Arc::new(Mutex::new(())),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // UI routes (HTML pages)
        .merge(api::ui_routes())
        // API routes
        .merge(api::review_routes())
        .merge(api::chart_routes())
        .merge(api::health_routes())
        .with_state(state)
}
