//! Chart data endpoints: per-product means and score distributions

use crate::error::{ApiError, ApiResult};
use crate::services::{
    filter_by, group_mean, histogram, score_counts, HistogramBin, ProductFilter, ScoreColumn,
};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Build chart routes
pub fn chart_routes() -> Router<AppState> {
    Router::new()
        .route("/api/charts/mean-sentiment", get(mean_sentiment))
        .route("/api/charts/score-distribution", get(score_distribution))
        .route("/api/charts/histogram", get(legacy_histogram))
}

fn no_session() -> ApiError {
    ApiError::NotFound("No review data loaded. POST /api/reviews/load first.".to_string())
}

fn parse_filter(product: Option<&str>) -> ProductFilter {
    product.map(ProductFilter::parse).unwrap_or(ProductFilter::All)
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub product: Option<String>,
    /// Score column: "sentiment_10" (default) or "sentiment_score"
    pub column: Option<String>,
    pub nbins: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MeanSentimentResponse {
    pub column: String,
    pub means: BTreeMap<String, f64>,
}

/// GET /api/charts/mean-sentiment?column=sentiment_score&product=all
async fn mean_sentiment(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> ApiResult<Json<MeanSentimentResponse>> {
    let guard = state.session.read().await;
    let session = guard.as_ref().ok_or_else(no_session)?;

    let column_name = query.column.as_deref().unwrap_or("sentiment_10");
    let column = ScoreColumn::parse(column_name)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown score column: {}", column_name)))?;

    let filtered = filter_by(&session.table, &parse_filter(query.product.as_deref()));

    Ok(Json(MeanSentimentResponse {
        column: column_name.to_string(),
        means: group_mean(&filtered, column),
    }))
}

#[derive(Debug, Serialize)]
pub struct ScoreDistributionResponse {
    /// Count per integer score, full 1..=10 scale
    pub counts: BTreeMap<u8, usize>,
}

/// GET /api/charts/score-distribution?product=all
///
/// Distribution of the pipeline's 1-10 scores, one bin per score.
async fn score_distribution(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> ApiResult<Json<ScoreDistributionResponse>> {
    let guard = state.session.read().await;
    let session = guard.as_ref().ok_or_else(no_session)?;

    let filtered = filter_by(&session.table, &parse_filter(query.product.as_deref()));

    Ok(Json(ScoreDistributionResponse {
        counts: score_counts(&filtered),
    }))
}

#[derive(Debug, Serialize)]
pub struct HistogramResponse {
    pub column: String,
    pub bins: Vec<HistogramBin>,
}

/// GET /api/charts/histogram?column=sentiment_score&nbins=10&product=all
///
/// Equal-width histogram over a score column (the legacy continuous
/// score by default).
async fn legacy_histogram(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> ApiResult<Json<HistogramResponse>> {
    let guard = state.session.read().await;
    let session = guard.as_ref().ok_or_else(no_session)?;

    let column_name = query.column.as_deref().unwrap_or("sentiment_score");
    let column = ScoreColumn::parse(column_name)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown score column: {}", column_name)))?;
    let nbins = query.nbins.unwrap_or(DEFAULT_HISTOGRAM_BINS);

    let filtered = filter_by(&session.table, &parse_filter(query.product.as_deref()));

    Ok(Json(HistogramResponse {
        column: column_name.to_string(),
        bins: histogram(&filtered, column, nbins),
    }))
}
