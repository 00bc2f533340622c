use http::StatusCode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::HttpError;

/// Headers attached to every response, regardless of outcome
const FIXED_HEADERS: [(&str, &str); 2] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
];

/// Fixed-shape response produced for every invocation
///
/// Mirrors the proxy-integration response shape: a status code, a header
/// map and a body carried as serialized JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutwardResponse {
    /// HTTP status code
    pub status_code: u16,
    /// Response headers, in emission order
    pub headers: IndexMap<String, String>,
    /// Serialized JSON body
    pub body: String,
}

/// Body of a successful generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessBody {
    /// Generated answer text
    pub response: String,
    /// Model that produced the answer
    #[serde(rename = "modelId")]
    pub model_id: String,
}

/// Body of any failed invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Client-safe error message
    pub error: String,
    /// Upstream payload kept for diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

impl OutwardResponse {
    /// Build a response with the fixed headers and a JSON-serialized body
    ///
    /// Only called with `SuccessBody` and `ErrorBody`: string keys and
    /// `serde_json::Value` leaves, which always serialize.
    fn json<T: Serialize>(status: StatusCode, body: &T) -> Self {
        let headers = FIXED_HEADERS
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();

        Self {
            status_code: status.as_u16(),
            headers,
            body: serde_json::to_string(body).expect("response bodies always serialize to JSON"),
        }
    }

    /// 200 response carrying the generated answer
    pub fn success(response: impl Into<String>, model_id: impl Into<String>) -> Self {
        let body = SuccessBody {
            response: response.into(),
            model_id: model_id.into(),
        };
        Self::json(StatusCode::OK, &body)
    }

    /// Error response derived from a domain error
    pub fn from_error<E: HttpError + ?Sized>(error: &E) -> Self {
        let body = ErrorBody {
            error: error.client_message(),
            raw: error.diagnostics().cloned(),
        };
        Self::json(error.status_code(), &body)
    }

    /// Status code as an [`http::StatusCode`]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Decode the body back into a JSON value
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}
