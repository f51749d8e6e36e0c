//! Registration and profile lookup.

use std::sync::{Arc, RwLock};

use crate::account::types::{Profile, RegisterRequest};
use crate::api::client::{ApiClient, RequestOptions};
use crate::api::error::ApiResult;

/// Token lookup collaborator; where the token lives is the caller's concern.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Process-local token holder.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }
}

/// Account operations against the backend API.
#[derive(Clone)]
pub struct AccountService {
    client: ApiClient,
    tokens: Arc<dyn TokenStore>,
}

impl AccountService {
    pub fn new(client: ApiClient, tokens: Arc<dyn TokenStore>) -> Self {
        Self { client, tokens }
    }

    /// Create a patient account.
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        self.client
            .post::<serde_json::Value, _>("/register", request)
            .await?;
        tracing::info!(email = %request.email, "account registered");
        Ok(())
    }

    /// Fetch the authenticated user's profile.
    ///
    /// The stored token is passed through as a bearer header when present;
    /// without one the request still goes out and the backend's 401 surfaces
    /// as an ordinary `ClientError`.
    pub async fn profile(&self) -> ApiResult<Profile> {
        let options = match self.tokens.token() {
            Some(token) => RequestOptions::bearer(&token),
            None => RequestOptions::default(),
        };
        self.client.get_with("/me", options).await
    }
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}
