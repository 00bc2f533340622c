//! Response translation: pipeline outcome to [`OutwardResponse`]

use foreman_core::OutwardResponse;
use serde_json::Value;

use crate::error::LlmError;
use crate::protocol::cohere::answer_text;

/// Everything that can reach the translator
#[derive(Debug)]
pub enum Outcome {
    /// The normalizer rejected the event
    Rejected(LlmError),
    /// The upstream call ran, successfully or not
    Invoked(Result<Value, LlmError>),
}

/// Map an outcome to the outward response
///
/// Any error from the upstream call is collapsed into a single opaque fault,
/// whatever its variant. Pure and deterministic.
pub fn translate(outcome: Outcome, model_id: &str) -> OutwardResponse {
    match outcome {
        Outcome::Rejected(error) => OutwardResponse::from_error(&error),
        Outcome::Invoked(Err(error)) => OutwardResponse::from_error(&LlmError::Upstream(error.to_string())),
        Outcome::Invoked(Ok(payload)) => match answer_text(&payload) {
            Some(answer) => OutwardResponse::success(answer, model_id),
            None => OutwardResponse::from_error(&LlmError::UnexpectedResponse { raw: payload }),
        },
    }
}
