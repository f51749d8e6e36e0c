//! Typed errors for the request client.

use thiserror::Error;

/// Failure families distinguished at the client boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The timeout elapsed and the in-flight call was cancelled.
    Timeout,
    /// The request never reached the server (DNS, connection refused).
    NetworkUnreachable,
    /// The server rejected the request (4xx).
    ClientError,
    /// The server failed to process the request (5xx).
    ServerError,
    /// Anything that does not fit the other families.
    Unknown,
}

/// Normalized failure of an HTTP call attempt.
///
/// Every failure leaving [`ApiClient`](crate::api::client::ApiClient) is one
/// of these; raw transport errors never escape uncategorized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (HTTP {status} {status_text})")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub status: u16,
    pub status_text: String,
    pub message: String,
}

impl ApiError {
    /// The timeout elapsed before the call completed.
    pub fn timeout() -> Self {
        Self {
            kind: ErrorKind::Timeout,
            status: 408,
            status_text: "Request Timeout".to_string(),
            message: "request timeout".to_string(),
        }
    }

    /// The request could not be dispatched at all.
    pub fn network_unreachable() -> Self {
        Self {
            kind: ErrorKind::NetworkUnreachable,
            status: 0,
            status_text: "Network Error".to_string(),
            message: "network error - please check your connection".to_string(),
        }
    }

    /// Uncategorized failure carrying the original message.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Unknown,
            status: 0,
            status_text: "Unknown Error".to_string(),
            message: message.into(),
        }
    }

    /// Classify a non-success HTTP status together with its extracted message.
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        let kind = if status.is_client_error() {
            ErrorKind::ClientError
        } else if status.is_server_error() {
            ErrorKind::ServerError
        } else {
            ErrorKind::Unknown
        };
        Self {
            kind,
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            message,
        }
    }

    /// True for failures the retry wrapper is allowed to attempt again.
    ///
    /// A 4xx response signals a caller-correctable problem, not a transient
    /// fault, so it is never transient.
    pub fn is_transient(&self) -> bool {
        self.kind != ErrorKind::ClientError
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
