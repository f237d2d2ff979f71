//! HTTP client for the Google Trends measurement API (SerpAPI transport).
//!
//! Fetches interest-over-time series and related-query lists for single
//! keywords, with typed rate-limit handling and a fixed-delay retry policy.
//! Only rate-limit responses are retried; every other failure is terminal
//! for the keyword being fetched.

pub mod client;
pub mod error;
pub mod retry;
pub mod types;

pub use client::TrendsClient;
pub use error::TrendsError;
pub use types::{RelatedQueries, TimeSeries};
