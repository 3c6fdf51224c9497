use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Image generation configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImagineConfig {
    /// Primary (credentialed) provider
    #[serde(default)]
    pub primary: PrimaryImageConfig,
    /// Fallback (keyless) provider
    #[serde(default)]
    pub fallback: FallbackImageConfig,
}

/// Primary image provider configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrimaryImageConfig {
    /// API key
    ///
    /// Absence is a valid runtime condition: requests then route
    /// straight to the fallback provider.
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Model identifier
    #[serde(default = "default_image_model")]
    pub model: String,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Hard deadline for the primary attempt, in seconds
    ///
    /// Deliberately short so the degrade decision happens fast.
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
}

impl Default for PrimaryImageConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_image_model(),
            base_url: None,
            deadline_secs: default_deadline_secs(),
        }
    }
}

/// Fallback image provider configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FallbackImageConfig {
    /// How the fallback result is delivered to the caller
    #[serde(default)]
    pub policy: FallbackPolicy,
    /// Base URL of the keyless image service
    #[serde(default = "default_fallback_base_url")]
    pub base_url: Url,
    /// Fixed output width in pixels
    #[serde(default = "default_dimension")]
    pub width: u32,
    /// Fixed output height in pixels
    #[serde(default = "default_dimension")]
    pub height: u32,
    /// Download timeout for embed mode, in seconds
    ///
    /// Longer than the primary deadline: by the time the fallback
    /// runs, a slow image beats no image.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for FallbackImageConfig {
    fn default() -> Self {
        Self {
            policy: FallbackPolicy::default(),
            base_url: default_fallback_base_url(),
            width: default_dimension(),
            height: default_dimension(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

/// Fallback delivery policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Return the fallback URL directly, without downloading
    #[default]
    Reference,
    /// Download the image and return it as an inline base64 payload
    Embed,
}

fn default_image_model() -> String {
    "imagen-3.0-generate-001".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_deadline_secs() -> u64 {
    4
}

fn default_fallback_base_url() -> Url {
    Url::parse("https://image.pollinations.ai").expect("valid default URL")
}

#[allow(clippy::missing_const_for_fn)]
fn default_dimension() -> u32 {
    1024
}

#[allow(clippy::missing_const_for_fn)]
fn default_fetch_timeout_secs() -> u64 {
    20
}
