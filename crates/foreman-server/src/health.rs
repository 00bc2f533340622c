use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Health check handler
///
/// Liveness only; the upstream model is not probed.
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
