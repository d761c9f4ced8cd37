//! Aggregation helpers for the dashboard charts
//!
//! Read-only consumers of the review table: per-product means, product
//! filtering, and score distributions. Null score cells are ignored;
//! a product whose rows are all null is excluded from means entirely.

use crate::models::ReviewTable;
use std::collections::BTreeMap;

/// Score column selector for aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreColumn {
    /// Legacy continuous score from the CSV
    SentimentScore,
    /// Integer score produced by the annotation pipeline
    Sentiment10,
}

impl ScoreColumn {
    /// Extract this column's value from a row, if set
    fn value(&self, row: &crate::models::ReviewRecord) -> Option<f64> {
        match self {
            ScoreColumn::SentimentScore => row.sentiment_score,
            ScoreColumn::Sentiment10 => row.sentiment_10.map(f64::from),
        }
    }

    /// Parse an API query value
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sentiment_score" => Some(ScoreColumn::SentimentScore),
            "sentiment_10" => Some(ScoreColumn::Sentiment10),
            _ => None,
        }
    }
}

/// Product selection with an explicit "all products" wildcard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    All,
    Product(String),
}

impl ProductFilter {
    /// Parse an API query value ("all" and "All Products" are wildcards)
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") || value.eq_ignore_ascii_case("all products") {
            ProductFilter::All
        } else {
            ProductFilter::Product(value.to_string())
        }
    }
}

/// Filter rows by product, preserving row order.
///
/// The wildcard returns the full table unchanged.
pub fn filter_by(table: &ReviewTable, filter: &ProductFilter) -> ReviewTable {
    match filter {
        ProductFilter::All => table.clone(),
        ProductFilter::Product(product) => table
            .rows()
            .iter()
            .filter(|row| &row.product == product)
            .cloned()
            .collect(),
    }
}

/// Arithmetic mean of a score column per product.
///
/// Rows with a null score are ignored; a product with no non-null rows
/// is omitted rather than reported as zero.
pub fn group_mean(table: &ReviewTable, column: ScoreColumn) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();

    for row in table.rows() {
        if let Some(value) = column.value(row) {
            let entry = sums.entry(row.product.clone()).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(product, (sum, count))| (product, sum / count as f64))
        .collect()
}

/// Count of each integer sentiment score, one bin per score 1..=10.
///
/// Scores that never occur still appear with a zero count so the chart
/// axis covers the full scale.
pub fn score_counts(table: &ReviewTable) -> BTreeMap<u8, usize> {
    let mut counts: BTreeMap<u8, usize> = (1..=10).map(|s| (s, 0)).collect();
    for row in table.rows() {
        if let Some(score) = row.sentiment_10 {
            *counts.entry(score).or_insert(0) += 1;
        }
    }
    counts
}

/// One bin of a continuous-score histogram
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram of a score column.
///
/// Empty after filtering nulls, or a degenerate min == max range,
/// yields a single bin covering the whole (point) range.
pub fn histogram(table: &ReviewTable, column: ScoreColumn, nbins: usize) -> Vec<HistogramBin> {
    let values: Vec<f64> = table.rows().iter().filter_map(|r| column.value(r)).collect();
    if values.is_empty() || nbins == 0 {
        return Vec::new();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / nbins as f64;
    let mut bins: Vec<HistogramBin> = (0..nbins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for value in values {
        let index = (((value - min) / width) as usize).min(nbins - 1);
        bins[index].count += 1;
    }

    bins
}
