//! Configuration resolution for revue-ui
//!
//! Scoring credentials and the dataset path resolve with ENV → TOML
//! priority; the dataset path additionally honors a CLI flag above
//! both. A warning is logged when a value is set in multiple sources.

use revue_common::config::TomlConfig;
use revue_common::{Error, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// Default dataset location relative to the working directory
pub const DEFAULT_DATASET_PATH: &str = "data/customer_reviews.csv";

/// Resolve the scoring API key from ENV → TOML
pub fn resolve_scoring_api_key(toml_config: &TomlConfig) -> Result<String> {
    let env_key = std::env::var("REVUE_SCORING_API_KEY").ok();
    let toml_key = toml_config.scoring_api_key.as_ref();

    let mut sources = Vec::new();
    if env_key.as_deref().is_some_and(is_valid_key) {
        sources.push("environment");
    }
    if toml_key.is_some_and(|k| is_valid_key(k)) {
        sources.push("TOML");
    }

    if sources.len() > 1 {
        warn!(
            "Scoring API key found in multiple sources: {}. Using environment (highest priority).",
            sources.join(", ")
        );
    }

    if let Some(key) = env_key {
        if is_valid_key(&key) {
            info!("Scoring API key loaded from environment variable");
            return Ok(key);
        }
    }

    if let Some(key) = toml_key {
        if is_valid_key(key) {
            info!("Scoring API key loaded from TOML config");
            return Ok(key.clone());
        }
    }

    Err(Error::Config(
        "Scoring API key not configured. Please configure using one of:\n\
         1. Environment: REVUE_SCORING_API_KEY=your-key-here\n\
         2. TOML config: revue.toml (scoring_api_key = \"your-key\")"
            .to_string(),
    ))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Resolve the review dataset path: CLI flag → ENV → TOML → default
pub fn resolve_dataset_path(cli_arg: Option<&str>, toml_config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var("REVUE_DATASET_PATH") {
        return PathBuf::from(path);
    }

    if let Some(path) = &toml_config.dataset_path {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_DATASET_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn toml_with(api_key: Option<&str>, dataset: Option<&str>) -> TomlConfig {
        TomlConfig {
            dataset_path: dataset.map(String::from),
            scoring_api_key: api_key.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("sk-abc"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("   "));
    }

    #[test]
    #[serial]
    fn test_api_key_env_beats_toml() {
        std::env::set_var("REVUE_SCORING_API_KEY", "sk-from-env");
        let key = resolve_scoring_api_key(&toml_with(Some("sk-from-toml"), None)).unwrap();
        std::env::remove_var("REVUE_SCORING_API_KEY");
        assert_eq!(key, "sk-from-env");
    }

    #[test]
    #[serial]
    fn test_api_key_falls_back_to_toml() {
        std::env::remove_var("REVUE_SCORING_API_KEY");
        let key = resolve_scoring_api_key(&toml_with(Some("sk-from-toml"), None)).unwrap();
        assert_eq!(key, "sk-from-toml");
    }

    #[test]
    #[serial]
    fn test_api_key_missing_is_config_error() {
        std::env::remove_var("REVUE_SCORING_API_KEY");
        let err = resolve_scoring_api_key(&toml_with(None, None)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    #[serial]
    fn test_dataset_path_priority() {
        std::env::remove_var("REVUE_DATASET_PATH");
        let toml = toml_with(None, Some("toml.csv"));

        assert_eq!(
            resolve_dataset_path(Some("cli.csv"), &toml),
            PathBuf::from("cli.csv")
        );
        assert_eq!(resolve_dataset_path(None, &toml), PathBuf::from("toml.csv"));

        std::env::set_var("REVUE_DATASET_PATH", "env.csv");
        assert_eq!(resolve_dataset_path(None, &toml), PathBuf::from("env.csv"));
        std::env::remove_var("REVUE_DATASET_PATH");

        assert_eq!(
            resolve_dataset_path(None, &toml_with(None, None)),
            PathBuf::from(DEFAULT_DATASET_PATH)
        );
    }
}
