//! Review CSV loading
//!
//! Materializes a `ReviewTable` from a CSV source. Table-level problems
//! (missing file, missing required column, unreadable rows) abort the
//! load before any partial table escapes.

use crate::models::{ReviewRecord, ReviewTable};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Required CSV columns
const REQUIRED_COLUMNS: [&str; 2] = ["PRODUCT", "SUMMARY"];

/// Loader errors
#[derive(Debug, Error)]
pub enum LoadError {
    /// Source file missing or unreadable
    #[error("Review source unavailable: {0}")]
    SourceUnavailable(String),

    /// Required column absent from the header row
    #[error("Required column missing from review data: {0}")]
    MissingColumn(String),

    /// A row could not be parsed
    #[error("Malformed review data: {0}")]
    Malformed(String),
}

/// CSV row as stored on disk
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "PRODUCT")]
    product: String,
    #[serde(rename = "SUMMARY")]
    summary: String,
    #[serde(rename = "SENTIMENT_SCORE", default)]
    sentiment_score: Option<f64>,
}

/// Load reviews from a CSV file.
///
/// `limit` caps the number of rows read (trial runs on large files);
/// `None` loads everything.
pub fn load_reviews(path: &Path, limit: Option<usize>) -> Result<ReviewTable, LoadError> {
    let file = std::fs::File::open(path)
        .map_err(|e| LoadError::SourceUnavailable(format!("{}: {}", path.display(), e)))?;

    let mut reader = csv::Reader::from_reader(file);

    // Header validation happens before any row is produced.
    let headers = reader
        .headers()
        .map_err(|e| LoadError::Malformed(e.to_string()))?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column.to_string()));
        }
    }

    let mut rows = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        if let Some(limit) = limit {
            if rows.len() >= limit {
                break;
            }
        }
        let row = result.map_err(|e| LoadError::Malformed(e.to_string()))?;
        rows.push(ReviewRecord {
            product: row.product,
            summary: row.summary,
            sentiment_score: row.sentiment_score,
            cleaned_summary: None,
            sentiment_10: None,
        });
    }

    tracing::info!(source = %path.display(), rows = rows.len(), "Loaded review data");
    Ok(ReviewTable::new(rows))
}
