//! Resilience wrappers around API calls.
//!
//! # Data Flow
//! ```text
//! API call:
//!     → loading.rs (flag held for the call's duration)
//!     → retries.rs (re-attempt transient failures under a budget)
//!     → backoff.rs (delay between attempts)
//! ```
//!
//! # Design Decisions
//! - 4xx failures are never retried; they need a corrected request
//! - Backoff is pure exponential; a single client needs no jitter
//! - The last real failure is surfaced, never a synthetic "retries exceeded"

pub mod backoff;
pub mod loading;
pub mod retries;

pub use loading::with_loading;
pub use retries::{with_retry, RetryPolicy};
