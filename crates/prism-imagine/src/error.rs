use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImagineError>;

/// Image generation errors that reach the caller
///
/// Primary-path failures never appear here: the degrader recovers
/// from them locally by switching to the fallback provider. Only a
/// rejected input or an exhausted fallback is surfaced.
#[derive(Debug, Error)]
pub enum ImagineError {
    /// Prompt missing or empty after trimming; no provider contacted
    #[error("prompt is required")]
    MissingPrompt,

    /// Both strategies failed; there is no third fallback
    #[error("image generation failed: {0}")]
    Exhausted(String),
}

impl ImagineError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingPrompt => StatusCode::BAD_REQUEST,
            Self::Exhausted(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ImagineError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // The missing-prompt rejection uses a bare error body; the
        // terminal failure carries the full success=false envelope.
        let body = match &self {
            Self::MissingPrompt => json!({ "error": self.to_string() }),
            Self::Exhausted(_) => json!({ "success": false, "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
