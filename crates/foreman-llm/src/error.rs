use foreman_core::HttpError;
use http::StatusCode;
use thiserror::Error;

/// Message returned for every upstream fault, whatever the cause
pub const UPSTREAM_FAULT_MESSAGE: &str = "Bedrock invoke failed";

/// Errors that can occur while normalizing or fulfilling a generation
#[derive(Debug, Error)]
pub enum LlmError {
    /// Event is not a JSON object
    #[error("Invalid event type")]
    InvalidEventType,

    /// Envelope body could not be decoded into a JSON object
    #[error("{0}")]
    MalformedBody(String),

    /// Neither a raw prompt nor a usable set of structured fields
    #[error("Provide either 'prompt' OR ('task' and one of 'process'/'issue').")]
    MissingPromptOrFields,

    /// A field held a value of the wrong type
    #[error("Invalid value for '{field}': expected {expected}")]
    InvalidParameter {
        /// Payload key that failed to coerce
        field: &'static str,
        /// Human-readable description of the accepted type
        expected: &'static str,
    },

    /// The upstream call failed for any reason
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The upstream call succeeded but carried no usable answer
    #[error("Unexpected model response format")]
    UnexpectedResponse {
        /// Decoded upstream payload
        raw: serde_json::Value,
    },
}

impl LlmError {
    /// Whether the error was caused by the caller's input
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidEventType | Self::MalformedBody(_) | Self::MissingPromptOrFields | Self::InvalidParameter { .. }
        )
    }
}

impl HttpError for LlmError {
    fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::BAD_GATEWAY
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidEventType => "invalid_event_type",
            Self::MalformedBody(_) => "malformed_body",
            Self::MissingPromptOrFields => "missing_prompt_or_fields",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::Upstream(_) => "upstream_error",
            Self::UnexpectedResponse { .. } => "unexpected_upstream_shape",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Upstream(_) => UPSTREAM_FAULT_MESSAGE.to_owned(),
            other => other.to_string(),
        }
    }

    fn diagnostics(&self) -> Option<&serde_json::Value> {
        match self {
            Self::UnexpectedResponse { raw } => Some(raw),
            _ => None,
        }
    }
}
