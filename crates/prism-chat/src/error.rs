use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChatError>;

/// Chat relay errors
///
/// The chat endpoint performs no local recovery: every error surfaces
/// to the caller as a 500 envelope with a best-effort message.
#[derive(Debug, Error)]
pub enum ChatError {
    /// No API key configured for the text provider
    #[error("API key not configured")]
    MissingCredential,

    /// Transport failure or provider error response
    #[error("{0}")]
    Upstream(String),
}

/// Uniform error envelope returned to callers
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
