//! Resilient HTTP request client.
//!
//! # Responsibilities
//! - Resolve request paths against the configured base URL
//! - Enforce a per-request timeout by cancelling the in-flight call
//! - Merge default headers with caller headers (caller wins)
//! - Decode success responses by status and content type
//! - Normalize every failure into the [`ApiError`] taxonomy

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::config::ApiConfig;

/// Per-request overrides.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers; these override the client defaults on collision.
    pub headers: HeaderMap,
    /// Replaces the client-wide timeout when set.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Options carrying an `Authorization: Bearer <token>` header.
    pub fn bearer(token: &str) -> Self {
        let mut options = Self::default();
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(value) => {
                options.headers.insert(AUTHORIZATION, value);
            }
            Err(_) => {
                tracing::warn!("token contains characters invalid in a header, skipping");
            }
        }
        options
    }

    /// Options with a request-specific timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..Self::default()
        }
    }
}

/// HTTP client bound to one API base address.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client from the API configuration.
    ///
    /// The base URL is validated here so a misconfiguration fails at startup
    /// rather than on the first request.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            ApiError::unknown(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    /// GET a JSON resource.
    pub async fn get<T>(&self, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
    {
        self.send(Method::GET, path, None, RequestOptions::default()).await
    }

    /// GET with per-request options (auth header, timeout).
    pub async fn get_with<T>(&self, path: &str, options: RequestOptions) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
    {
        self.send(Method::GET, path, None, options).await
    }

    /// POST a JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, Some(encode_body(body)?), RequestOptions::default())
            .await
    }

    /// POST with per-request options.
    pub async fn post_with<T, B>(&self, path: &str, body: &B, options: RequestOptions) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, Some(encode_body(body)?), options).await
    }

    /// PUT a JSON body.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, path, Some(encode_body(body)?), RequestOptions::default())
            .await
    }

    /// PATCH a JSON body.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        self.send(Method::PATCH, path, Some(encode_body(body)?), RequestOptions::default())
            .await
    }

    /// DELETE a resource.
    pub async fn delete<T>(&self, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
    {
        self.send(Method::DELETE, path, None, RequestOptions::default()).await
    }

    /// Dispatch one request and decode the outcome.
    async fn send<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        options: RequestOptions,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let url = self.resolve_url(path)?;
        let timeout = options.timeout.unwrap_or(self.timeout);
        let request_id = Uuid::new_v4();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        let mut builder = self.http.request(method.clone(), url.clone()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        tracing::debug!(%request_id, method = %method, url = %url, "dispatching request");

        // The elapsed timer drops the in-flight call, which aborts it; there
        // is no timer to leak on any exit path.
        let response = match tokio::time::timeout(timeout, builder.send()).await {
            Err(_) => {
                tracing::warn!(
                    %request_id,
                    timeout_ms = timeout.as_millis() as u64,
                    "request timed out"
                );
                return Err(ApiError::timeout());
            }
            Ok(Err(err)) => return Err(classify_transport_error(&err)),
            Ok(Ok(response)) => response,
        };

        let status = response.status();
        if !status.is_success() {
            let message = extract_error_message(response).await;
            tracing::warn!(%request_id, status = status.as_u16(), %message, "request failed");
            return Err(ApiError::from_status(status, message));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(T::default());
        }
        if !is_json(response.headers()) {
            tracing::warn!(%request_id, url = %url, "successful response without a JSON body");
            return Ok(T::default());
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::unknown(err.to_string()))
    }

    /// Relative paths are concatenated onto the base URL; absolute URLs pass
    /// through unchanged.
    fn resolve_url(&self, path: &str) -> ApiResult<Url> {
        let full = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        };
        Url::parse(&full).map_err(|e| ApiError::unknown(format!("invalid request URL '{full}': {e}")))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout.as_millis())
            .finish()
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> ApiResult<Vec<u8>> {
    serde_json::to_vec(body).map_err(|err| ApiError::unknown(format!("failed to encode body: {err}")))
}

fn classify_transport_error(err: &reqwest::Error) -> ApiError {
    if err.is_connect() {
        tracing::warn!(error = %err, "network unreachable");
        ApiError::network_unreachable()
    } else if err.is_timeout() {
        ApiError::timeout()
    } else {
        ApiError::unknown(err.to_string())
    }
}

/// Shape of an error body the backend may return.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

/// Pull a human-readable message out of a non-success response.
///
/// JSON bodies yield `error`, then `message`, then `details`; a JSON body
/// without any of them yields a generic per-status message. Non-JSON bodies
/// yield their raw text. Extraction itself never fails: an unreadable or
/// unparseable body falls back to `HTTP <status>: <status text>`.
async fn extract_error_message(response: Response) -> String {
    let status = response.status();
    let json_body = is_json(response.headers());
    let fallback = format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    );

    match response.text().await {
        Ok(body) if json_body => match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => parsed
                .error
                .or(parsed.message)
                .or(parsed.details)
                .unwrap_or_else(|| format!("request failed with status {}", status.as_u16())),
            Err(_) => fallback,
        },
        Ok(body) if !body.is_empty() => body,
        _ => fallback,
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}
