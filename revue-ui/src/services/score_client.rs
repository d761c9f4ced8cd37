//! Sentiment scoring service client
//!
//! Talks to an OpenAI-compatible chat completions endpoint. The client
//! returns the raw model output; validating and parsing the score is
//! the annotation pipeline's job.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-5-mini";
const USER_AGENT: &str = "Revue/0.1.0 (https://github.com/revue/revue)";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const RATE_LIMIT_MS: u64 = 250; // 4 requests per second

/// Scoring client errors (transport-level; per-row, never fatal to a batch)
#[derive(Debug, Error)]
pub enum ScoreClientError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Empty response from scoring service")]
    EmptyResponse,

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Text scoring service collaborator
///
/// Injected into the annotation pipeline so tests can substitute a
/// scripted double for the network client.
#[async_trait]
pub trait ScoreClient: Send + Sync {
    /// Request a sentiment score for one review text.
    ///
    /// Returns the raw response text; no validation happens here.
    async fn score(&self, text: &str) -> Result<String, ScoreClientError>;
}

/// Chat completions request body
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completions response body (subset)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Minimum-interval rate limiter for the scoring API
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval: Duration::from_millis(min_interval_ms),
        }
    }

    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Scoring API rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// OpenAI-compatible scoring client
pub struct OpenAiScoreClient {
    http_client: reqwest::Client,
    rate_limiter: Arc<RateLimiter>,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiScoreClient {
    pub fn new(api_key: String, model: Option<String>) -> Result<Self, ScoreClientError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ScoreClientError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            rate_limiter: Arc::new(RateLimiter::new(RATE_LIMIT_MS)),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the API base URL (self-hosted gateways, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the scoring prompt for one review
    fn build_prompt(review: &str) -> String {
        format!(
            "Assign a sentiment score from 1 to 10 for the following customer review, \
             where 1 is very negative and 10 is very positive.:\n\n{}\n\n\
             Sentiment Score (a number):",
            review
        )
    }
}

#[async_trait]
impl ScoreClient for OpenAiScoreClient {
    async fn score(&self, text: &str) -> Result<String, ScoreClientError> {
        // Rate limit
        self.rate_limiter.wait().await;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Self::build_prompt(text),
            }],
        };

        tracing::debug!(model = %self.model, text_len = text.len(), "Querying scoring API");

        let response = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ScoreClientError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status == 401 {
            return Err(ScoreClientError::InvalidApiKey);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ScoreClientError::ApiError(status.as_u16(), error_text));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ScoreClientError::ParseError(e.to_string()))?;

        let raw = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or(ScoreClientError::EmptyResponse)?
            .message
            .content;

        Ok(raw)
    }
}
