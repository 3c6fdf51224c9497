use serde::{Deserialize, Serialize};

/// Chat request as sent by the caller
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Current user prompt; empty is tolerated and forwarded as a space
    #[serde(default)]
    pub prompt: String,
    /// Prior conversation turns, oldest first
    #[serde(default)]
    pub history: Option<Vec<ChatTurn>>,
    /// Optional inline image, base64-encoded, optionally with a
    /// `data:image/...;base64,` prefix
    #[serde(default, rename = "imageBase64")]
    pub image_base64: Option<String>,
}

/// A single prior turn in the caller's role vocabulary
///
/// Role "ai" maps to the provider's model/assistant role; anything
/// else maps to user.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatTurn {
    /// Caller-facing role ("ai" or "user")
    pub role: String,
    /// Turn text
    pub text: String,
}

/// Successful chat response envelope
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    /// Always true on the success path
    pub success: bool,
    /// Reply text from the provider, or the fixed placeholder when
    /// the provider returned no usable text
    pub text: String,
}
