//! Mock Bedrock runtime endpoint for integration tests
//!
//! Serves `POST /model/{model_id}/invoke` with a canned reply and records
//! what it received.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

/// How the mock answers every invocation
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with this JSON payload
    Json(serde_json::Value),
    /// 200 with a body that is not JSON
    Garbage(String),
    /// Service error with the given status
    Error(StatusCode),
}

/// Mock Bedrock endpoint
pub struct MockBedrock {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockBedrockState>,
}

struct MockBedrockState {
    reply: Reply,
    invoke_count: AtomicU32,
    last_model_id: Mutex<Option<String>>,
    last_body: Mutex<Option<serde_json::Value>>,
}

impl MockBedrock {
    /// Start a mock answering with `{"text": text}`
    pub async fn answering(text: &str) -> anyhow::Result<Self> {
        Self::start(Reply::Json(serde_json::json!({ "text": text, "finish_reason": "COMPLETE" }))).await
    }

    /// Start a mock with an arbitrary reply
    pub async fn start(reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(MockBedrockState {
            reply,
            invoke_count: AtomicU32::new(0),
            last_model_id: Mutex::new(None),
            last_body: Mutex::new(None),
        });

        let app = Router::new()
            .route("/model/{model_id}/invoke", routing::post(handle_invoke))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Endpoint URL to configure as `bedrock.endpoint_url`
    pub fn endpoint_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of invoke calls received
    pub fn invoke_count(&self) -> u32 {
        self.state.invoke_count.load(Ordering::Relaxed)
    }

    /// Model id from the most recent call
    pub fn last_model_id(&self) -> Option<String> {
        self.state.last_model_id.lock().unwrap().clone()
    }

    /// Decoded request body from the most recent call
    pub fn last_body(&self) -> Option<serde_json::Value> {
        self.state.last_body.lock().unwrap().clone()
    }
}

impl Drop for MockBedrock {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_invoke(
    State(state): State<Arc<MockBedrockState>>,
    Path(model_id): Path<String>,
    body: axum::body::Bytes,
) -> Response {
    state.invoke_count.fetch_add(1, Ordering::Relaxed);
    *state.last_model_id.lock().unwrap() = Some(model_id);
    *state.last_body.lock().unwrap() = serde_json::from_slice(&body).ok();

    match &state.reply {
        Reply::Json(payload) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            payload.to_string(),
        )
            .into_response(),
        Reply::Garbage(text) => (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], text.clone()).into_response(),
        Reply::Error(status) => (
            *status,
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::HeaderName::from_static("x-amzn-errortype"), "InternalServerException"),
            ],
            r#"{"message":"mock failure"}"#,
        )
            .into_response(),
    }
}
