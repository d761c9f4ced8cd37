//! Review text normalization
//!
//! Strips punctuation and collapses whitespace ahead of display and
//! keyword analysis. Scoring uses the raw summary text; the cleaned
//! column is an independent derivation.

use crate::models::ReviewTable;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("valid regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize review text: keep ASCII letters, digits and spaces only,
/// collapse whitespace runs to a single space, trim the ends.
///
/// Total and idempotent; empty input yields empty output.
pub fn normalize(text: &str) -> String {
    let stripped = NON_ALPHANUMERIC.replace_all(text, "");
    WHITESPACE_RUN
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// Fill `cleaned_summary` for every row from its raw summary.
///
/// Recomputed unconditionally; returns the number of rows written.
pub fn clean_table(table: &mut ReviewTable) -> usize {
    for row in table.rows_mut() {
        row.cleaned_summary = Some(normalize(&row.summary));
    }
    table.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewRecord;

    #[test]
    fn test_strips_special_characters() {
        assert_eq!(normalize("Great product!!! 10/10, would buy."), "Great product 1010 would buy");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  too   many\t\tspaces\n here  "), "too many spaces here");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_only_special_characters() {
        assert_eq!(normalize("!!!???***"), "");
    }

    #[test]
    fn test_output_alphabet() {
        let out = normalize("héllo, wörld — naïve résumé #42");
        assert!(out.chars().all(|c| c.is_ascii_alphanumeric() || c == ' '));
        assert!(!out.starts_with(' ') && !out.ends_with(' '));
        assert!(!out.contains("  "));
    }

    #[test]
    fn test_clean_table_fills_every_row() {
        let mut table = ReviewTable::new(vec![
            ReviewRecord::new("Widget", "Love it!!!"),
            ReviewRecord::new("Gadget", "  meh...  "),
        ]);

        let written = clean_table(&mut table);
        assert_eq!(written, 2);
        assert_eq!(table.rows()[0].cleaned_summary.as_deref(), Some("Love it"));
        assert_eq!(table.rows()[1].cleaned_summary.as_deref(), Some("meh"));
    }

    #[test]
    fn test_idempotent() {
        for input in ["", "plain text", "  a!b@c#d$ e% ", "¡excelente! muy bien..."] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }
}
