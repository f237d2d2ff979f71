use serde::Deserialize;

/// Weekly interest samples for one keyword, oldest first. Values are the
/// provider's 0–100 relative-popularity scale; never negative.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub points: Vec<f64>,
}

impl TimeSeries {
    #[must_use]
    pub fn new(points: Vec<f64>) -> Self {
        Self { points }
    }

    /// Most recent sample, or 0.0 for an empty series.
    #[must_use]
    pub fn current(&self) -> f64 {
        self.points.last().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Related search terms for one keyword, already truncated to the top five
/// of each kind by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedQueries {
    pub top: Vec<String>,
    pub rising: Vec<String>,
}

// --- wire types (SerpAPI google_trends engine) ---

#[derive(Debug, Deserialize)]
pub(crate) struct TimeseriesResponse {
    #[serde(default)]
    pub interest_over_time: Option<InterestOverTime>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InterestOverTime {
    #[serde(default)]
    pub timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimelinePoint {
    #[serde(default)]
    pub values: Vec<TimelineValue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimelineValue {
    #[serde(default)]
    pub extracted_value: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RelatedQueriesResponse {
    #[serde(default)]
    pub related_queries: Option<RelatedQueriesBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RelatedQueriesBlock {
    #[serde(default)]
    pub top: Vec<RelatedQueryEntry>,
    #[serde(default)]
    pub rising: Vec<RelatedQueryEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RelatedQueryEntry {
    #[serde(default)]
    pub query: String,
}
