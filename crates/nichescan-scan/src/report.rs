//! Final ranked report: sort, filter, write.

use std::path::Path;

use crate::checkpoint::write_rows;
use crate::error::ScanError;
use crate::threshold::passes_threshold;
use crate::types::{ScanResult, SortBy};

/// Sorts the full collection descending by the chosen key and applies the
/// threshold filter.
///
/// If no keyword qualifies, falls back to returning all errorless rows so a
/// completed scan never produces an empty report; error rows are excluded
/// in every case.
#[must_use]
pub fn finalize_results(
    results: &[ScanResult],
    min_growth: f64,
    sort_by: SortBy,
) -> Vec<ScanResult> {
    let mut qualifying: Vec<ScanResult> = results
        .iter()
        .filter(|r| passes_threshold(r, min_growth))
        .cloned()
        .collect();

    if qualifying.is_empty() {
        qualifying = results
            .iter()
            .filter(|r| r.error.is_none())
            .cloned()
            .collect();
    }

    match sort_by {
        SortBy::Score => qualifying
            .sort_by(|a, b| b.recommendation_score.total_cmp(&a.recommendation_score)),
        SortBy::Growth1Yr => {
            qualifying.sort_by(|a, b| b.growth_1yr.total_cmp(&a.growth_1yr));
        }
    }

    qualifying
}

/// Writes the ranked rows to the output CSV.
///
/// # Errors
///
/// Returns `ScanError` if the file cannot be written.
pub fn write_report(path: &Path, rows: &[ScanResult]) -> Result<(), ScanError> {
    write_rows(path, rows)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "report written");
    Ok(())
}
