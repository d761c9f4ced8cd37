//! HTTP server and routing integration tests
//!
//! Drives the full router with a scripted scoring client; no network.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use revue_ui::services::{ScoreClient, ScoreClientError};
use revue_ui::{build_router, AppState};
use serde_json::Value;
use std::collections::VecDeque;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Scripted scoring client: pops one canned response per call
struct ScriptedClient {
    responses: Mutex<VecDeque<Result<String, String>>>,
}

impl ScriptedClient {
    fn new(responses: Vec<Result<&str, &str>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|r| r.map(String::from).map_err(String::from))
                    .collect(),
            ),
        })
    }
}

#[async_trait]
impl ScoreClient for ScriptedClient {
    async fn score(&self, _text: &str) -> Result<String, ScoreClientError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("more calls than scripted responses")
            .map_err(ScoreClientError::NetworkError)
    }
}

const SAMPLE_CSV: &str = "PRODUCT,SUMMARY,SENTIMENT_SCORE\n\
    Widget,Works great!,0.9\n\
    Widget,Stopped working after a week...,-0.4\n\
    Gadget,Does what it says,0.5\n";

/// Write a CSV fixture and build app state around it.
/// The temp file handle must stay alive for the test's duration.
fn test_app_state(csv: &str, responses: Vec<Result<&str, &str>>) -> (AppState, tempfile::NamedTempFile) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", csv).unwrap();

    let state = AppState::new(file.path().to_path_buf(), ScriptedClient::new(responses));
    (state, file)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_root_route_serves_html() {
    let (state, _csv) = test_app_state(SAMPLE_CSV, vec![]);
    let app = build_router(state);

    let response = app.oneshot(request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("text/html"));
}

#[tokio::test]
async fn test_health_reports_session_state() {
    let (state, _csv) = test_app_state(SAMPLE_CSV, vec![]);
    let app = build_router(state);

    let response = app.clone().oneshot(request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "revue-ui");
    assert_eq!(body["session_loaded"], false);

    app.clone()
        .oneshot(request("POST", "/api/reviews/load"))
        .await
        .unwrap();
    let body = json_body(app.oneshot(request("GET", "/health")).await.unwrap()).await;
    assert_eq!(body["session_loaded"], true);
}

#[tokio::test]
async fn test_reviews_before_load_is_not_found() {
    let (state, _csv) = test_app_state(SAMPLE_CSV, vec![]);
    let app = build_router(state);

    let response = app.oneshot(request("GET", "/api/reviews")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_load_and_list_reviews() {
    let (state, _csv) = test_app_state(SAMPLE_CSV, vec![]);
    let app = build_router(state);

    let response = app
        .clone()
        .oneshot(request("POST", "/api/reviews/load"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["rows"], 3);

    let body = json_body(
        app.clone()
            .oneshot(request("GET", "/api/reviews?product=all"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["rows"][0]["product"], "Widget");
    assert_eq!(body["rows"][0]["sentiment_10"], Value::Null);

    let body = json_body(
        app.clone()
            .oneshot(request("GET", "/api/reviews?product=Gadget"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["rows"][0]["summary"], "Does what it says");

    let body = json_body(app.oneshot(request("GET", "/api/products")).await.unwrap()).await;
    assert_eq!(body["products"], serde_json::json!(["Widget", "Gadget"]));
}

#[tokio::test]
async fn test_load_with_row_limit() {
    let (state, _csv) = test_app_state(SAMPLE_CSV, vec![]);
    let app = build_router(state);

    let body = json_body(
        app.oneshot(request("POST", "/api/reviews/load?limit=1"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["rows"], 1);
}

#[tokio::test]
async fn test_load_missing_file_is_source_unavailable() {
    let client = ScriptedClient::new(vec![]);
    let state = AppState::new(PathBuf::from("/nonexistent/reviews.csv"), client);
    let app = build_router(state);

    let response = app.oneshot(request("POST", "/api/reviews/load")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "SOURCE_UNAVAILABLE");
}

#[tokio::test]
async fn test_load_missing_column_is_bad_request() {
    let (state, _csv) = test_app_state("PRODUCT,REVIEW\nWidget,Fine\n", vec![]);
    let app = build_router(state);

    let response = app.oneshot(request("POST", "/api/reviews/load")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "MISSING_COLUMN");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("SUMMARY"));
}

#[tokio::test]
async fn test_clean_fills_cleaned_summary() {
    let (state, _csv) = test_app_state(SAMPLE_CSV, vec![]);
    let app = build_router(state);

    app.clone()
        .oneshot(request("POST", "/api/reviews/load"))
        .await
        .unwrap();

    let body = json_body(
        app.clone()
            .oneshot(request("POST", "/api/reviews/clean"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["rows_cleaned"], 3);

    let body = json_body(app.oneshot(request("GET", "/api/reviews")).await.unwrap()).await;
    assert_eq!(body["rows"][0]["cleaned_summary"], "Works great");
    assert_eq!(
        body["rows"][1]["cleaned_summary"],
        "Stopped working after a week"
    );
}

#[tokio::test]
async fn test_annotate_end_to_end() {
    let (state, _csv) = test_app_state(SAMPLE_CSV, vec![Ok("9"), Ok("high"), Ok("6")]);
    let app = build_router(state);

    app.clone()
        .oneshot(request("POST", "/api/reviews/load"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(request("POST", "/api/reviews/annotate"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["report"]["scored"], 2);
    assert_eq!(body["report"]["invalid"], 1);
    assert_eq!(body["report"]["client_errors"], 0);
    assert_eq!(body["report"]["outcomes"][1]["row_index"], 1);
    assert_eq!(body["report"]["outcomes"][1]["outcome"]["kind"], "invalid");

    let body = json_body(
        app.clone()
            .oneshot(request("GET", "/api/reviews"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["rows"][0]["sentiment_10"], 9);
    assert_eq!(body["rows"][1]["sentiment_10"], Value::Null);
    assert_eq!(body["rows"][2]["sentiment_10"], 6);

    // Charts reflect the annotated table
    let body = json_body(
        app.clone()
            .oneshot(request("GET", "/api/charts/mean-sentiment"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["means"]["Widget"], 9.0);
    assert_eq!(body["means"]["Gadget"], 6.0);

    let body = json_body(
        app.oneshot(request("GET", "/api/charts/score-distribution"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["counts"]["9"], 1);
    assert_eq!(body["counts"]["6"], 1);
    assert_eq!(body["counts"]["1"], 0);
}

#[tokio::test]
async fn test_annotate_while_run_in_flight_is_conflict() {
    let (state, _csv) = test_app_state(SAMPLE_CSV, vec![]);
    let app = build_router(state.clone());

    app.clone()
        .oneshot(request("POST", "/api/reviews/load"))
        .await
        .unwrap();

    // Hold the run gate as an in-flight run would
    let _held = state.annotate_gate.lock().await;

    let response = app
        .oneshot(request("POST", "/api/reviews/annotate"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_annotate_without_session_is_not_found() {
    let (state, _csv) = test_app_state(SAMPLE_CSV, vec![]);
    let app = build_router(state);

    let response = app
        .oneshot(request("POST", "/api/reviews/annotate"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_legacy_histogram_over_csv_scores() {
    let (state, _csv) = test_app_state(SAMPLE_CSV, vec![]);
    let app = build_router(state);

    app.clone()
        .oneshot(request("POST", "/api/reviews/load"))
        .await
        .unwrap();

    let body = json_body(
        app.clone()
            .oneshot(request("GET", "/api/charts/histogram?nbins=2"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["column"], "sentiment_score");
    assert_eq!(body["bins"].as_array().unwrap().len(), 2);
    let total: u64 = body["bins"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["count"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 3);

    let response = app
        .oneshot(request("GET", "/api/charts/histogram?column=bogus"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
