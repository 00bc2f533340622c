//! Axum route handlers for the proxy-envelope and direct-invoke conventions

use axum::body::{Body, Bytes};
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::response::Response;
use axum::{Router, routing};
use foreman_core::OutwardResponse;
use http::header::{HeaderName, HeaderValue};
use serde_json::Value;

use crate::error::LlmError;
use crate::state::GenerationState;

/// Largest request body accepted on the generation routes
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Build the generation router with all endpoints
pub fn generation_router(state: GenerationState) -> Router {
    Router::new()
        // Body text is wrapped as `{"body": "..."}`, as a proxy integration would
        .route("/v1/generate", routing::post(generate))
        // Body is the event itself
        .route("/v1/invoke", routing::post(invoke))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

/// Handle `POST /v1/generate`
///
/// Bodies that are not valid UTF-8 are rejected as malformed instead of
/// being decoded lossily.
async fn generate(State(state): State<GenerationState>, body: Result<Bytes, BytesRejection>) -> Response {
    let text = match body.map(|bytes| String::from_utf8(bytes.to_vec())) {
        Ok(Ok(text)) => text,
        Ok(Err(_)) => return render(state.reject(LlmError::MalformedBody("Invalid JSON in request body".to_owned()))),
        Err(rejection) => return render(state.reject(unreadable(&rejection))),
    };

    let event = serde_json::json!({ "body": text });
    render(state.handle(&event).await)
}

/// Handle `POST /v1/invoke`
///
/// A body that is not JSON is passed on as a JSON string so the normalizer
/// rejects it as an invalid event.
async fn invoke(State(state): State<GenerationState>, body: Result<Bytes, BytesRejection>) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return render(state.reject(unreadable(&rejection))),
    };

    let event = serde_json::from_slice::<Value>(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
    render(state.handle(&event).await)
}

/// Body could not be buffered, usually because it exceeds [`MAX_BODY_BYTES`]
fn unreadable(rejection: &BytesRejection) -> LlmError {
    tracing::debug!(error = %rejection.body_text(), "failed to read request body");
    LlmError::MalformedBody("Request body could not be read".to_owned())
}

/// Render an outward response verbatim
fn render(outward: OutwardResponse) -> Response {
    let status = outward.status();
    let mut response = Response::new(Body::from(outward.body));
    *response.status_mut() = status;

    for (name, value) in outward.headers {
        match (HeaderName::try_from(name.as_str()), HeaderValue::try_from(value.as_str())) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().insert(name, value);
            }
            _ => tracing::warn!(header = %name, "skipping invalid response header"),
        }
    }

    response
}
