//! Weighted recommendation scoring.

use crate::types::GrowthProfile;

/// Per-horizon score weights. Recency-biased: the default table weights
/// shorter horizons higher. A valid table sums to 1.0 (enforced at config
/// load, see `nichescan-core`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub w_1mo: f64,
    pub w_3mo: f64,
    pub w_6mo: f64,
    pub w_1yr: f64,
    pub w_5yr: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            w_1mo: 0.30,
            w_3mo: 0.25,
            w_6mo: 0.20,
            w_1yr: 0.15,
            w_5yr: 0.10,
        }
    }
}

impl ScoreWeights {
    /// Builds weights from the config table, ordered 1mo, 3mo, 6mo, 1yr, 5yr
    /// (see `nichescan_core::app_config::WEIGHT_HORIZONS`).
    #[must_use]
    pub fn from_table(table: [f64; 5]) -> Self {
        Self {
            w_1mo: table[0],
            w_3mo: table[1],
            w_6mo: table[2],
            w_1yr: table[3],
            w_5yr: table[4],
        }
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.w_1mo + self.w_3mo + self.w_6mo + self.w_1yr + self.w_5yr
    }
}

/// Weighted sum of the profile's horizon growths, rounded to two decimals
/// for reproducible output.
#[must_use]
pub fn recommendation_score(profile: &GrowthProfile, weights: &ScoreWeights) -> f64 {
    let raw = profile.growth_1mo * weights.w_1mo
        + profile.growth_3mo * weights.w_3mo
        + profile.growth_6mo * weights.w_6mo
        + profile.growth_1yr * weights.w_1yr
        + profile.growth_5yr * weights.w_5yr;
    (raw * 100.0).round() / 100.0
}
