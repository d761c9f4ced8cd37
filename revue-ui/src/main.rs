//! revue-ui - Customer Review Sentiment Dashboard
//!
//! Loads a CSV of customer reviews, derives cleaned text, scores each
//! review 1-10 via an external generative scoring service, and serves
//! a browser dashboard over HTTP.

use anyhow::Result;
use clap::Parser;
use revue_ui::config::{resolve_dataset_path, resolve_scoring_api_key};
use revue_ui::services::OpenAiScoreClient;
use revue_ui::AppState;
use std::sync::Arc;
use tracing::info;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "revue-ui", about = "Customer review sentiment dashboard")]
struct Args {
    /// Path to the review CSV (overrides ENV and TOML config)
    #[arg(long)]
    dataset: Option<String>,

    /// Port to listen on
    #[arg(long, default_value_t = 5731)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config file is read before tracing init so its logging level can
    // serve as the default when RUST_LOG is not set.
    let toml_config = revue_common::config::load_config()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&toml_config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        "Starting Revue dashboard (revue-ui) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let dataset_path = resolve_dataset_path(args.dataset.as_deref(), &toml_config);
    info!("Dataset: {}", dataset_path.display());

    let api_key = resolve_scoring_api_key(&toml_config)?;
    let mut score_client = OpenAiScoreClient::new(api_key, toml_config.scoring_model.clone())?;
    if let Some(base_url) = &toml_config.scoring_base_url {
        info!("Scoring API base URL: {}", base_url);
        score_client = score_client.with_base_url(base_url.clone());
    }

    let state = AppState::new(dataset_path, Arc::new(score_client));
    let app = revue_ui::build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("Listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
