use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Default Google Generative Language API base URL
pub const DEFAULT_GOOGLE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Chat relay configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// API key for the text provider
    ///
    /// Absence is fatal for the chat endpoint at request time,
    /// not at startup.
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Model identifier
    #[serde(default = "default_chat_model")]
    pub model: String,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Sampling temperature, fixed per deployment
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Output length cap, fixed per deployment
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_chat_model(),
            base_url: None,
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_chat_model() -> String {
    "gemini-1.5-pro".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_temperature() -> f64 {
    0.7
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_output_tokens() -> u32 {
    2048
}
