//! Review session endpoints: load, clean, annotate, table access

use crate::error::{ApiError, ApiResult};
use crate::models::{AnnotationReport, ReviewRecord, ReviewSession};
use crate::services::{clean_table, filter_by, load_reviews, AnnotationPipeline, ProductFilter};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Build review routes
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/api/reviews/load", post(load_session))
        .route("/api/reviews/clean", post(clean_session))
        .route("/api/reviews/annotate", post(annotate_session))
        .route("/api/reviews", get(list_reviews))
        .route("/api/products", get(list_products))
}

fn no_session() -> ApiError {
    ApiError::NotFound("No review data loaded. POST /api/reviews/load first.".to_string())
}

#[derive(Debug, Deserialize)]
pub struct LoadParams {
    /// Optional row cap for trial runs on large files
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct LoadResponse {
    pub session_id: Uuid,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub rows: usize,
}

/// POST /api/reviews/load
///
/// Loads the configured CSV into a fresh session, replacing any
/// previous one.
async fn load_session(
    State(state): State<AppState>,
    Query(params): Query<LoadParams>,
) -> ApiResult<Json<LoadResponse>> {
    let table = load_reviews(&state.dataset_path, params.limit)?;
    let session = ReviewSession::new(state.dataset_path.clone(), table);

    let response = LoadResponse {
        session_id: session.id,
        source: session.source.display().to_string(),
        loaded_at: session.loaded_at,
        rows: session.table.len(),
    };

    *state.session.write().await = Some(session);
    Ok(Json(response))
}

#[derive(Debug, Serialize)]
pub struct CleanResponse {
    pub session_id: Uuid,
    pub rows_cleaned: usize,
}

/// POST /api/reviews/clean
///
/// Fills the cleaned_summary column for every row. Independent of
/// scoring; recomputed unconditionally.
async fn clean_session(State(state): State<AppState>) -> ApiResult<Json<CleanResponse>> {
    let mut guard = state.session.write().await;
    let session = guard.as_mut().ok_or_else(no_session)?;

    let rows_cleaned = clean_table(&mut session.table);
    Ok(Json(CleanResponse {
        session_id: session.id,
        rows_cleaned,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AnnotateParams {
    /// Recompute rows that already carry a score
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
pub struct AnnotateResponse {
    pub session_id: Uuid,
    pub report: AnnotationReport,
}

/// POST /api/reviews/annotate
///
/// Runs the annotation pipeline over the session table. Only one run
/// may be in flight at a time; a second trigger gets 409.
async fn annotate_session(
    State(state): State<AppState>,
    Query(params): Query<AnnotateParams>,
) -> ApiResult<Json<AnnotateResponse>> {
    let _gate = state
        .annotate_gate
        .try_lock()
        .map_err(|_| ApiError::Conflict("Annotation run already in progress".to_string()))?;

    let mut guard = state.session.write().await;
    let session = guard.as_mut().ok_or_else(no_session)?;

    let pipeline = AnnotationPipeline::new(state.score_client.clone());
    let report = pipeline.annotate(&mut session.table, params.force).await;

    Ok(Json(AnnotateResponse {
        session_id: session.id,
        report,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    /// Product name or the "all" wildcard
    pub product: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReviewListResponse {
    pub session_id: Uuid,
    pub total: usize,
    pub rows: Vec<ReviewRecord>,
}

/// GET /api/reviews?product=all
async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewQuery>,
) -> ApiResult<Json<ReviewListResponse>> {
    let guard = state.session.read().await;
    let session = guard.as_ref().ok_or_else(no_session)?;

    let filter = query
        .product
        .as_deref()
        .map(ProductFilter::parse)
        .unwrap_or(ProductFilter::All);
    let filtered = filter_by(&session.table, &filter);

    Ok(Json(ReviewListResponse {
        session_id: session.id,
        total: filtered.len(),
        rows: filtered.rows().to_vec(),
    }))
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<String>,
}

/// GET /api/products
async fn list_products(State(state): State<AppState>) -> ApiResult<Json<ProductListResponse>> {
    let guard = state.session.read().await;
    let session = guard.as_ref().ok_or_else(no_session)?;

    Ok(Json(ProductListResponse {
        products: session.table.products(),
    }))
}
