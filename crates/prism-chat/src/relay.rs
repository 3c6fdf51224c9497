use std::sync::OnceLock;

use regex::Regex;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::ChatError;
use crate::protocol::{
    GoogleContent, GoogleGenerationConfig, GoogleInlineData, GooglePart, GoogleRequest, GoogleResponse,
    extract_error_message,
};
use crate::types::{ChatRequest, ChatTurn};

/// Placeholder returned when the provider yields no usable text
const NO_REPLY_PLACEHOLDER: &str = "(no reply)";

/// Mime type assumed for inline images after prefix stripping
const INLINE_IMAGE_MIME: &str = "image/jpeg";

/// Chat relay holding the outbound client and fixed generation parameters
pub struct ChatRelay {
    client: Client,
    api_key: Option<SecretString>,
    base_url: Url,
    model: String,
    temperature: f64,
    max_output_tokens: u32,
}

impl ChatRelay {
    /// Create from configuration
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded default base URL is invalid (should never happen).
    pub fn new(config: &prism_config::ChatConfig) -> Self {
        let base_url = config.base_url.clone().unwrap_or_else(|| {
            Url::parse(prism_config::DEFAULT_GOOGLE_BASE_URL).expect("valid default URL")
        });

        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }

    /// Build the `generateContent` endpoint URL
    fn generate_url(&self, api_key: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/models/{}:generateContent?key={api_key}", self.model)
    }

    /// Relay a chat request to the provider and extract the reply text
    ///
    /// History turns are replayed in caller order, then the current turn
    /// is appended last. Generation parameters are fixed per deployment;
    /// the caller cannot override them.
    pub async fn relay(&self, request: &ChatRequest) -> crate::error::Result<String> {
        let api_key = self.api_key.as_ref().ok_or(ChatError::MissingCredential)?;

        let wire_request = GoogleRequest {
            contents: build_contents(request),
            generation_config: Some(GoogleGenerationConfig {
                temperature: Some(self.temperature),
                max_output_tokens: Some(self.max_output_tokens),
            }),
        };

        let url = self.generate_url(api_key.expose_secret());

        tracing::debug!(model = %self.model, "sending chat request");

        let response = self
            .client
            .post(&url)
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "chat upstream request failed");
                ChatError::Upstream(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "chat upstream returned error");
            return Err(ChatError::Upstream(extract_error_message(&body)));
        }

        let wire_response: GoogleResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Upstream(format!("failed to parse response: {e}")))?;

        Ok(wire_response
            .first_text()
            .unwrap_or(NO_REPLY_PLACEHOLDER)
            .to_string())
    }
}

/// Assemble provider contents: prior turns in order, current turn last
fn build_contents(request: &ChatRequest) -> Vec<GoogleContent> {
    let mut contents: Vec<GoogleContent> = request
        .history
        .iter()
        .flatten()
        .map(turn_to_content)
        .collect();

    let prompt = if request.prompt.is_empty() {
        " "
    } else {
        request.prompt.as_str()
    };

    let mut parts = vec![GooglePart::Text(prompt.to_string())];
    if let Some(image) = &request.image_base64 {
        parts.push(GooglePart::InlineData(GoogleInlineData {
            mime_type: INLINE_IMAGE_MIME.to_string(),
            data: strip_data_url_prefix(image).to_string(),
        }));
    }

    contents.push(GoogleContent {
        role: Some("user".to_string()),
        parts,
    });

    contents
}

/// Map a caller-vocabulary turn into a provider content object
fn turn_to_content(turn: &ChatTurn) -> GoogleContent {
    let role = if turn.role == "ai" { "model" } else { "user" };
    GoogleContent {
        role: Some(role.to_string()),
        parts: vec![GooglePart::Text(turn.text.clone())],
    }
}

/// Strip a `data:image/...;base64,` prefix, leaving the raw payload
fn strip_data_url_prefix(encoded: &str) -> &str {
    fn re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"^data:image/\w+;base64,").expect("must be valid regex"))
    }

    re().find(encoded).map_or(encoded, |m| &encoded[m.end()..])
}
