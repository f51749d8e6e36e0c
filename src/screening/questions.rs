//! Question loading and screening submission over HTTP.

use async_trait::async_trait;

use crate::api::client::ApiClient;
use crate::api::error::{ApiError, ApiResult};
use crate::resilience::retries::{with_retry, RetryPolicy};
use crate::screening::form::ScreeningSubmitter;
use crate::screening::types::Question;

/// Loads the questionnaire through the configured retry policy.
#[derive(Debug, Clone)]
pub struct ScreeningService {
    client: ApiClient,
    retry: RetryPolicy,
}

impl ScreeningService {
    pub fn new(client: ApiClient, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    /// Fetch the screening questions.
    ///
    /// Transient failures are retried. A failure that survives the budget
    /// must surface as a full error state in the view, never as a silently
    /// empty form; an empty list, by contrast, is a valid response.
    pub async fn load_questions(&self) -> ApiResult<Vec<Question>> {
        let questions = with_retry(&self.retry, || {
            self.client.get::<Vec<Question>>("/screening/questions")
        })
        .await?;
        tracing::info!(count = questions.len(), "screening questions loaded");
        Ok(questions)
    }
}

/// Production submitter: posts the merged payload to the screening endpoint.
#[derive(Debug, Clone)]
pub struct HttpScreeningSubmitter {
    client: ApiClient,
}

impl HttpScreeningSubmitter {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ScreeningSubmitter for HttpScreeningSubmitter {
    async fn submit(&self, payload: &serde_json::Value) -> Result<(), ApiError> {
        self.client
            .post::<serde_json::Value, _>("/screening", payload)
            .await?;
        Ok(())
    }
}
