//! Exponential backoff.

use std::time::Duration;

/// Delay inserted after attempt `attempt` (zero-indexed) has failed.
///
/// Pure exponential: `base * 2^attempt`, saturating. No jitter and no cap;
/// the retry budget bounds the growth.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let exponent = 2u64.saturating_pow(attempt);
    Duration::from_millis((base.as_millis() as u64).saturating_mul(exponent))
}
