//! Qualification predicate for the final report.

use crate::types::ScanResult;

/// `true` if the result qualifies for the report: no fetch error, and at
/// least one horizon's growth meets the threshold.
///
/// Deliberately an OR across horizons rather than a test on the blended
/// score — a keyword exploding on a single horizon is still interesting
/// even when its weighted score is modest.
#[must_use]
pub fn passes_threshold(result: &ScanResult, min_growth: f64) -> bool {
    if result.error.is_some() {
        return false;
    }
    result
        .growth_horizons()
        .iter()
        .any(|g| *g >= min_growth)
}
