//! Bounded retry with exponential backoff.

use std::future::Future;
use std::time::Duration;

use crate::api::error::ApiResult;
use crate::config::RetryConfig;
use crate::resilience::backoff::backoff_delay;

/// Retry budget for a repeated operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts allowed after the first, so `max_retries + 1` in total.
    pub max_retries: u32,
    /// Base delay, doubled after every failed attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
        }
    }
}

/// Run `operation` until it succeeds or the budget is exhausted.
///
/// 4xx failures stop the loop immediately; the caller has to correct the
/// request, not wait it out. Whatever the reason the loop stops, the error
/// surfaced is the one from the last attempt actually made.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> ApiResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= policy.max_retries || !err.is_transient() {
                    return Err(err);
                }
                let delay = backoff_delay(policy.base_delay, attempt);
                tracing::debug!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "retrying after failure"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
