//! Data model for the review dashboard
//!
//! A `ReviewTable` is loaded wholesale from CSV, lives for one session,
//! and is mutated in place by the clean and annotate operations. Row
//! identity is positional within the loaded batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// One customer review row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewRecord {
    /// Product name (CSV `PRODUCT` column)
    pub product: String,
    /// Raw review text (CSV `SUMMARY` column)
    pub summary: String,
    /// Legacy continuous sentiment score (CSV `SENTIMENT_SCORE`, optional)
    pub sentiment_score: Option<f64>,
    /// Normalized review text, filled by the clean operation
    pub cleaned_summary: Option<String>,
    /// Integer sentiment in [1,10], filled by the annotation pipeline
    pub sentiment_10: Option<u8>,
}

impl ReviewRecord {
    pub fn new(product: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            summary: summary.into(),
            sentiment_score: None,
            cleaned_summary: None,
            sentiment_10: None,
        }
    }
}

/// Ordered in-memory table of review rows
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReviewTable {
    rows: Vec<ReviewRecord>,
}

impl ReviewTable {
    pub fn new(rows: Vec<ReviewRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ReviewRecord] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [ReviewRecord] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct product names in first-seen order (for the UI selector)
    pub fn products(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if !seen.iter().any(|p| p == &row.product) {
                seen.push(row.product.clone());
            }
        }
        seen
    }
}

impl FromIterator<ReviewRecord> for ReviewTable {
    fn from_iter<I: IntoIterator<Item = ReviewRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// One loaded dataset held by the application state
///
/// Created on load, replaced wholesale on reload, never shared across
/// concurrent sessions.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    pub id: Uuid,
    pub source: PathBuf,
    pub loaded_at: DateTime<Utc>,
    pub table: ReviewTable,
}

impl ReviewSession {
    pub fn new(source: PathBuf, table: ReviewTable) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            loaded_at: Utc::now(),
            table,
        }
    }
}

/// Per-row result of one annotation run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowOutcome {
    /// Valid in-range score written into the table
    Scored { value: u8 },
    /// Response did not parse to an integer in [1,10]
    Invalid,
    /// Transport failure reaching the scoring service
    ClientError { reason: String },
}

/// Outcome for a single processed row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowReport {
    pub row_index: usize,
    pub outcome: RowOutcome,
}

/// Summary of one annotation run
///
/// Rows skipped because they already carried a score do not appear in
/// `outcomes`; only processed rows do, in table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnnotationReport {
    /// Rows successfully scored this run
    pub scored: usize,
    /// Rows whose response was not a parseable in-range integer
    pub invalid: usize,
    /// Rows that failed with a transport error
    pub client_errors: usize,
    /// Rows skipped because sentiment_10 was already set
    pub skipped: usize,
    /// Per-row outcomes for processed rows, in table order
    pub outcomes: Vec<RowReport>,
}

impl AnnotationReport {
    /// Record the outcome for one processed row
    pub fn record(&mut self, row_index: usize, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Scored { .. } => self.scored += 1,
            RowOutcome::Invalid => self.invalid += 1,
            RowOutcome::ClientError { .. } => self.client_errors += 1,
        }
        self.outcomes.push(RowReport { row_index, outcome });
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn display_string(&self) -> String {
        format!(
            "{} scored, {} invalid, {} client errors, {} skipped",
            self.scored, self.invalid, self.client_errors, self.skipped
        )
    }
}
