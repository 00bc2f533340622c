//! Cohere Command R native request format for Bedrock `InvokeModel`

use serde::Serialize;
use serde_json::Value;

use crate::types::GenerationRequest;

/// Request body for Command R / R+ models
#[derive(Debug, Serialize)]
pub struct CohereChatRequest<'a> {
    /// Current user message
    pub message: &'a str,
    /// Maximum tokens to generate
    pub max_tokens: i64,
    /// Sampling temperature
    pub temperature: f64,
    /// Nucleus sampling threshold
    pub p: f64,
    /// Top-k cutoff
    pub k: i64,
    /// Prior turns (`{"role": "USER" | "CHATBOT", "message": ...}`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_history: Option<&'a [Value]>,
}

impl<'a> From<&'a GenerationRequest> for CohereChatRequest<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            message: &request.prompt,
            max_tokens: request.params.max_tokens,
            temperature: request.params.temperature,
            p: request.params.nucleus_p,
            k: request.params.top_k,
            chat_history: request.chat_history.as_deref(),
        }
    }
}

/// Generated text from a decoded response payload
///
/// Only a string-typed top-level `text` field counts as an answer.
pub fn answer_text(payload: &Value) -> Option<&str> {
    payload.get("text").and_then(Value::as_str)
}
