//! HTTP request handling.
//!
//! # Data Flow
//! ```text
//! caller path + body
//!     → client.rs (resolve URL, merge headers, enforce timeout)
//!     → backend API
//!     → decode by status/content type, or
//!     → error.rs (normalize into the ApiError taxonomy)
//! ```
//!
//! # Design Decisions
//! - Every failure is classified before it leaves this module
//! - Timeouts cancel the in-flight call, not just the caller's wait
//! - 204 and non-JSON successes decode to an empty value instead of failing

pub mod client;
pub mod error;

pub use client::{ApiClient, RequestOptions};
pub use error::{ApiError, ApiResult, ErrorKind};
