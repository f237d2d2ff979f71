//! Multi-horizon growth extraction from an interest series.
//!
//! Pure and deterministic: no I/O, no clock. Offsets are in weekly samples
//! over the provider's 5-year window; a series shorter than a horizon
//! degrades to its earliest sample instead of failing.

use nichescan_trends::TimeSeries;

use crate::types::GrowthProfile;

/// Look-back offsets in weekly samples. The 5-year horizon is the first
/// sample of the series rather than a fixed offset.
const OFFSET_1MO: usize = 5;
const OFFSET_3MO: usize = 13;
const OFFSET_6MO: usize = 26;
const OFFSET_1YR: usize = 52;

/// Bounded percentage growth from `past` to `current`.
///
/// A zero (or negative) baseline with positive current interest reports
/// exactly `cap` — the "breakout" case. Growth is clamped at `cap` on the
/// upside only; declines are reported as-is.
#[must_use]
pub fn growth(current: f64, past: f64, cap: f64) -> f64 {
    if past <= 0.0 {
        return if current > 0.0 { cap } else { 0.0 };
    }
    (((current - past) / past) * 100.0).min(cap)
}

/// Series value `offset` samples back, or the earliest sample when the
/// series is too short.
fn past_value(series: &TimeSeries, offset: usize) -> f64 {
    let len = series.points.len();
    if len > offset {
        series.points[len - offset]
    } else {
        series.points[0]
    }
}

/// Extracts the growth profile for a series. An empty series produces the
/// all-zero profile (callers normally treat that case as a fetch failure
/// before reaching here).
#[must_use]
pub fn extract_profile(series: &TimeSeries, cap: f64) -> GrowthProfile {
    if series.is_empty() {
        return GrowthProfile::default();
    }

    let current = series.current();

    GrowthProfile {
        current,
        growth_1mo: growth(current, past_value(series, OFFSET_1MO), cap),
        growth_3mo: growth(current, past_value(series, OFFSET_3MO), cap),
        growth_6mo: growth(current, past_value(series, OFFSET_6MO), cap),
        growth_1yr: growth(current, past_value(series, OFFSET_1YR), cap),
        growth_5yr: growth(current, series.points[0], cap),
    }
}
