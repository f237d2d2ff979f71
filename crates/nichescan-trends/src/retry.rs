//! Fixed-delay retry for rate-limited requests.
//!
//! The measurement provider throttles aggressively but recovers after a
//! flat cool-down, so the schedule is a constant backoff rather than an
//! exponential one. Only [`TrendsError::RateLimited`] is retried; data
//! absence and transport failures are terminal for the keyword and are
//! propagated immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::TrendsError;

/// Retry policy for a single keyword fetch: up to `max_retries` additional
/// attempts after the first, with a fixed `backoff_secs` sleep before each.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_secs: u64,
}

fn is_retriable(err: &TrendsError) -> bool {
    matches!(err, TrendsError::RateLimited { .. })
}

/// Executes `operation`, retrying on rate-limit errors with a fixed backoff.
///
/// With `max_retries = 3` the operation is attempted at most 4 times total.
/// If every attempt is rate limited, the rate-limit error is replaced by
/// [`TrendsError::MaxRetriesExceeded`] so callers see a terminal failure.
///
/// Non-retriable errors are returned immediately without sleeping.
///
/// # Errors
///
/// Propagates the first non-retriable error, or `MaxRetriesExceeded` once
/// the retry budget is spent.
pub async fn retry_rate_limited<T, F, Fut>(
    policy: RetryPolicy,
    keyword: &str,
    mut operation: F,
) -> Result<T, TrendsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TrendsError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) {
                    return Err(err);
                }
                if attempt >= policy.max_retries {
                    return Err(TrendsError::MaxRetriesExceeded {
                        keyword: keyword.to_owned(),
                        attempts: attempt + 1,
                    });
                }
                tracing::warn!(
                    keyword,
                    attempt,
                    max_retries = policy.max_retries,
                    backoff_secs = policy.backoff_secs,
                    error = %err,
                    "rate limited — retrying after backoff"
                );
            }
        }

        tokio::time::sleep(Duration::from_secs(policy.backoff_secs)).await;
        attempt += 1;
    }
}
