//! Shared state and the end-to-end generation pipeline

use std::sync::Arc;

use foreman_config::BedrockConfig;
use foreman_core::{HttpError, OutwardResponse};
use serde_json::Value;

use crate::error::LlmError;
use crate::normalize::normalize;
use crate::provider::{Provider, bedrock::BedrockProvider};
use crate::translate::{Outcome, translate};

/// Shared state for generation route handlers
///
/// Immutable after construction; cloning is cheap.
#[derive(Clone)]
pub struct GenerationState {
    pub(crate) inner: Arc<GenerationStateInner>,
}

pub(crate) struct GenerationStateInner {
    pub(crate) provider: Arc<dyn Provider>,
}

impl GenerationState {
    /// Wrap an existing provider
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            inner: Arc::new(GenerationStateInner { provider }),
        }
    }

    /// Build state backed by Bedrock
    ///
    /// # Errors
    ///
    /// Returns an error if the Bedrock client cannot be configured
    pub async fn from_config(config: &BedrockConfig) -> anyhow::Result<Self> {
        let provider = BedrockProvider::new(config).await?;
        Ok(Self::new(Arc::new(provider)))
    }

    /// Model identifier reported in successful responses
    pub fn model_id(&self) -> &str {
        self.inner.provider.model_id()
    }

    /// Run one event through normalization, the upstream call and translation
    ///
    /// Makes at most one upstream call and never fails: every branch ends in
    /// a 200, 400 or 502 response.
    pub async fn handle(&self, event: &Value) -> OutwardResponse {
        let provider = &self.inner.provider;

        let outcome = match normalize(event) {
            // Upstream faults are logged by the provider
            Ok(request) => Outcome::Invoked(provider.invoke(&request).await),
            Err(error) => return self.reject(error),
        };

        self.finish(outcome)
    }

    /// Answer with a client error without touching the upstream model
    ///
    /// Also used by hosts that cannot build an event at all, e.g. when the
    /// request body is unreadable.
    pub fn reject(&self, error: LlmError) -> OutwardResponse {
        tracing::debug!(error_type = error.error_type(), error = %error, "rejected generation event");
        self.finish(Outcome::Rejected(error))
    }

    fn finish(&self, outcome: Outcome) -> OutwardResponse {
        let model_id = self.inner.provider.model_id();
        let response = translate(outcome, model_id);
        tracing::info!(status = response.status_code, model_id = %model_id, "generation handled");

        response
    }
}
