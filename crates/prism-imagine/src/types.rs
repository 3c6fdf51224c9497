use serde::{Deserialize, Serialize};

/// Image generation request as sent by the caller
#[derive(Debug, Clone, Deserialize)]
pub struct ImagineRequest {
    /// Text description of the desired image; required and non-empty
    #[serde(default)]
    pub prompt: String,
    /// Aspect ratio hint (e.g. "16:9"); honored by the primary
    /// provider only, defaulted to square when absent
    #[serde(default, rename = "aspectRatio")]
    pub aspect_ratio: Option<String>,
}

/// Which provider actually produced a successful result
///
/// Load-bearing for caller-side trust and cost accounting; never
/// omitted on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageSource {
    /// Credentialed high-fidelity provider
    #[serde(rename = "google")]
    Primary,
    /// Keyless fallback service
    #[serde(rename = "pollinations")]
    Fallback,
}

/// Successful image generation envelope
#[derive(Debug, Clone, Serialize)]
pub struct ImagineResponse {
    /// Always true on the success path
    pub success: bool,
    /// Inline `data:` payload or a resolvable URL, depending on the
    /// producing provider and the configured fallback policy
    pub image: String,
    /// Provider that produced the image
    pub source: ImageSource,
}
