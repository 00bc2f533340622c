//! Provider trait and the Bedrock implementation

pub mod bedrock;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::types::GenerationRequest;

/// Upstream generation backend
///
/// Implementations make exactly one call per `invoke` and do not retry.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Model identifier reported back to callers
    fn model_id(&self) -> &str;

    /// Send the request and return the decoded response payload
    async fn invoke(&self, request: &GenerationRequest) -> Result<serde_json::Value, LlmError>;
}
