//! HTTP client for interest-over-time and related-query lookups.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::TrendsError;
use crate::retry::{retry_rate_limited, RetryPolicy};
use crate::types::{
    RelatedQueries, RelatedQueriesResponse, TimeSeries, TimeseriesResponse,
};

const DEFAULT_BASE_URL: &str = "https://serpapi.com/";

/// How many related/rising queries to keep per keyword.
const RELATED_QUERY_LIMIT: usize = 5;

/// Client for the Google Trends engine of the SerpAPI measurement service.
///
/// Handles rate limiting (429) as a typed, retriable error and every other
/// failure as a typed terminal error. Use [`TrendsClient::new`] for
/// production or [`TrendsClient::with_base_url`] to point at a mock server
/// in tests.
pub struct TrendsClient {
    client: Client,
    api_key: String,
    base_url: Url,
    retry: RetryPolicy,
}

impl TrendsClient {
    /// Creates a new client pointed at the production API.
    ///
    /// `max_retries` bounds the additional attempts made after a rate-limit
    /// response; `backoff_secs` is the fixed wait before each retry.
    ///
    /// # Errors
    ///
    /// Returns [`TrendsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_secs: u64,
    ) -> Result<Self, TrendsError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_secs,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`TrendsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`TrendsError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_secs: u64,
        base_url: &str,
    ) -> Result<Self, TrendsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() resolves against the root rather than replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| TrendsError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            retry: RetryPolicy {
                max_retries,
                backoff_secs,
            },
        })
    }

    /// Fetches the interest-over-time series for one keyword, retrying
    /// rate-limit responses per the configured policy.
    ///
    /// # Errors
    ///
    /// - [`TrendsError::NoData`] — the provider returned an empty timeline
    ///   (terminal, never retried; absence of data is not transient).
    /// - [`TrendsError::MaxRetriesExceeded`] — every attempt was rate
    ///   limited.
    /// - [`TrendsError::Http`] / [`TrendsError::UnexpectedStatus`] /
    ///   [`TrendsError::Deserialize`] — terminal transport or shape
    ///   failures, not retried.
    pub async fn fetch_interest_over_time(
        &self,
        keyword: &str,
        geo: &str,
        timeframe: &str,
    ) -> Result<TimeSeries, TrendsError> {
        let url = self.build_url(
            "TIMESERIES",
            &[("q", keyword), ("geo", geo), ("date", timeframe)],
        )?;

        retry_rate_limited(self.retry, keyword, || {
            let url = url.clone();
            async move {
                let body = self.request_json(url, keyword).await?;

                let parsed: TimeseriesResponse =
                    serde_json::from_str(&body).map_err(|e| TrendsError::Deserialize {
                        context: format!("interest_over_time(\"{keyword}\")"),
                        source: e,
                    })?;

                let points: Vec<f64> = parsed
                    .interest_over_time
                    .map(|iot| {
                        iot.timeline_data
                            .into_iter()
                            .map(|point| {
                                point
                                    .values
                                    .first()
                                    .map_or(0.0, |v| v.extracted_value)
                            })
                            .collect()
                    })
                    .unwrap_or_default();

                if points.is_empty() {
                    return Err(TrendsError::NoData {
                        keyword: keyword.to_owned(),
                    });
                }

                Ok(TimeSeries::new(points))
            }
        })
        .await
    }

    /// Fetches the top and rising related queries for one keyword, truncated
    /// to five entries each.
    ///
    /// This is a best-effort secondary signal: callers are expected to log
    /// and swallow failures rather than fail the keyword. One attempt only,
    /// no retry.
    ///
    /// # Errors
    ///
    /// Same terminal variants as [`Self::fetch_interest_over_time`], plus
    /// [`TrendsError::RateLimited`] surfaced directly.
    pub async fn fetch_related_queries(
        &self,
        keyword: &str,
        geo: &str,
    ) -> Result<RelatedQueries, TrendsError> {
        let url = self.build_url("RELATED_QUERIES", &[("q", keyword), ("geo", geo)])?;
        let body = self.request_json(url, keyword).await?;

        let parsed: RelatedQueriesResponse =
            serde_json::from_str(&body).map_err(|e| TrendsError::Deserialize {
                context: format!("related_queries(\"{keyword}\")"),
                source: e,
            })?;

        let mut related = RelatedQueries::default();
        if let Some(block) = parsed.related_queries {
            related.top = block
                .top
                .into_iter()
                .take(RELATED_QUERY_LIMIT)
                .map(|e| e.query)
                .collect();
            related.rising = block
                .rising
                .into_iter()
                .take(RELATED_QUERY_LIMIT)
                .map(|e| e.query)
                .collect();
        }

        Ok(related)
    }

    /// Issues one GET and returns the response body, mapping 429 and other
    /// non-2xx statuses to typed errors.
    async fn request_json(&self, url: Url, keyword: &str) -> Result<String, TrendsError> {
        let url_str = url.to_string();
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);

            return Err(TrendsError::RateLimited {
                keyword: keyword.to_owned(),
                retry_after_secs,
            });
        }

        if !status.is_success() {
            return Err(TrendsError::UnexpectedStatus {
                status: status.as_u16(),
                url: url_str,
            });
        }

        Ok(response.text().await?)
    }

    /// Builds the `search` URL for the given data type and keyword params.
    fn build_url(&self, data_type: &str, params: &[(&str, &str)]) -> Result<Url, TrendsError> {
        let mut url = self
            .base_url
            .join("search")
            .map_err(|e| TrendsError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("engine", "google_trends");
            pairs.append_pair("data_type", data_type);
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("api_key", &self.api_key);
        }

        Ok(url)
    }
}
