use axum::response::IntoResponse;
use http::StatusCode;

/// Liveness handler
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "prism relay is running")
}
