//! Sentiment annotation pipeline
//!
//! Walks the review table in row order, asks the scoring client for a
//! score on each row that does not already have one, validates the raw
//! response, and writes valid scores back into the table. Row-level
//! failures are recorded in the report and never abort the batch.

use crate::models::{AnnotationReport, ReviewTable, RowOutcome};
use crate::services::ScoreClient;
use std::sync::Arc;

/// Annotation pipeline over a review table
pub struct AnnotationPipeline {
    client: Arc<dyn ScoreClient>,
}

impl AnnotationPipeline {
    /// Create a pipeline with an injected scoring client
    pub fn new(client: Arc<dyn ScoreClient>) -> Self {
        Self { client }
    }

    /// Annotate the table in place.
    ///
    /// Rows whose `sentiment_10` is already set are skipped unless
    /// `force` is true, in which case every row is recomputed and rows
    /// that fail are reset to null. Each row makes at most one client
    /// call per run; calling again with `force == false` after a fully
    /// successful run makes zero calls.
    pub async fn annotate(&self, table: &mut ReviewTable, force: bool) -> AnnotationReport {
        let total = table.len();
        tracing::info!(rows = total, force, "Starting annotation run");

        let mut report = AnnotationReport::default();

        for (row_index, row) in table.rows_mut().iter_mut().enumerate() {
            if row.sentiment_10.is_some() && !force {
                report.record_skipped();
                continue;
            }

            // Forced recomputation must not leave a stale score behind
            // when the new attempt fails.
            row.sentiment_10 = None;

            let outcome = match self.client.score(&row.summary).await {
                Ok(raw) => match parse_score(&raw) {
                    Some(value) => {
                        row.sentiment_10 = Some(value);
                        RowOutcome::Scored { value }
                    }
                    None => {
                        tracing::warn!(row_index, raw = raw.trim(), "Unparseable score response");
                        RowOutcome::Invalid
                    }
                },
                Err(e) => {
                    tracing::warn!(row_index, error = %e, "Scoring client call failed");
                    RowOutcome::ClientError {
                        reason: e.to_string(),
                    }
                }
            };

            report.record(row_index, outcome);
        }

        tracing::info!(rows = total, summary = %report.display_string(), "Annotation run complete");
        report
    }
}

/// Parse a raw scoring response into an in-range score.
///
/// The trimmed response must parse exactly as a decimal integer in
/// [1,10]; anything else (partial numbers, floats, prose, out-of-range
/// values) yields None.
pub fn parse_score(raw: &str) -> Option<u8> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|v| (1..=10).contains(v))
        .map(|v| v as u8)
}
