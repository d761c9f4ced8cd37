//! Configuration file loading and path resolution
//!
//! Revue reads an optional TOML configuration file. Resolution priority:
//! 1. `REVUE_CONFIG` environment variable (explicit path)
//! 2. `./revue.toml` in the working directory
//! 3. `~/.config/revue/revue.toml` (platform config dir)
//!
//! A missing file is not an error; defaults apply and individual values
//! may still be supplied via environment variables or CLI flags.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// TOML configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Path to the review CSV dataset
    pub dataset_path: Option<String>,
    /// API key for the sentiment scoring service
    pub scoring_api_key: Option<String>,
    /// Model identifier passed to the scoring service
    pub scoring_model: Option<String>,
    /// Base URL of the scoring service (override for self-hosted gateways)
    pub scoring_base_url: Option<String>,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing level when RUST_LOG is not set (error/warn/info/debug/trace)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Resolve the configuration file path, if any exists
pub fn resolve_config_path() -> Option<PathBuf> {
    // Priority 1: explicit environment override
    if let Ok(path) = std::env::var("REVUE_CONFIG") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    // Priority 2: working-directory file
    let local = PathBuf::from("revue.toml");
    if local.exists() {
        return Some(local);
    }

    // Priority 3: platform config directory
    if let Some(dir) = dirs::config_dir() {
        let path = dir.join("revue").join("revue.toml");
        if path.exists() {
            return Some(path);
        }
    }

    None
}

/// Load and parse a TOML configuration file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load configuration from the resolved path, falling back to defaults
pub fn load_config() -> Result<TomlConfig> {
    match resolve_config_path() {
        Some(path) => {
            debug!(config_file = %path.display(), "Loading TOML configuration");
            load_toml_config(&path)
        }
        None => {
            debug!("No configuration file found, using defaults");
            Ok(TomlConfig::default())
        }
    }
}
