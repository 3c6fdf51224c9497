use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use prism_config::FallbackPolicy;
use reqwest::Client;
use thiserror::Error;
use url::Url;

/// Failure of the fallback attempt
///
/// Only reachable under the embed policy; the reference policy builds
/// a URL without any network operation.
#[derive(Debug, Error)]
pub(crate) enum FallbackFailure {
    /// Network error or download timeout
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-success status from the fallback service
    #[error("fallback service returned {0}")]
    Status(u16),
}

/// Keyless fallback image provider
pub(crate) struct FallbackProvider {
    client: Client,
    base_url: Url,
    policy: FallbackPolicy,
    width: u32,
    height: u32,
    fetch_timeout: Duration,
}

impl FallbackProvider {
    /// Create from configuration
    pub fn new(config: &prism_config::FallbackImageConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            policy: config.policy,
            width: config.width,
            height: config.height,
            fetch_timeout: Duration::from_secs(config.fetch_timeout_secs),
        }
    }

    /// Build the generation URL for a prompt and seed
    ///
    /// The prompt is percent-encoded as a path segment; dimensions are
    /// fixed and square regardless of the caller's aspect ratio. The
    /// seed varies per request so identical prompts do not collide in
    /// the service's cache.
    fn build_url(&self, prompt: &str, seed: u32) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("base URL cannot be a base")
            .pop_if_empty()
            .push("prompt")
            .push(prompt);
        url.query_pairs_mut()
            .append_pair("width", &self.width.to_string())
            .append_pair("height", &self.height.to_string())
            .append_pair("seed", &seed.to_string())
            .append_pair("nologo", "true");
        url
    }

    /// Produce an image reference for the prompt under the configured
    /// policy
    ///
    /// Reference mode returns the URL itself and cannot fail. Embed
    /// mode downloads the image under its own timeout and re-encodes
    /// it inline.
    pub async fn deliver(&self, prompt: &str) -> std::result::Result<String, FallbackFailure> {
        let seed: u32 = rand::random();
        let url = self.build_url(prompt, seed);

        match self.policy {
            FallbackPolicy::Reference => {
                tracing::debug!(%url, "returning fallback image reference");
                Ok(url.into())
            }
            FallbackPolicy::Embed => {
                tracing::debug!(%url, timeout = ?self.fetch_timeout, "downloading fallback image");

                let response = self
                    .client
                    .get(url)
                    .timeout(self.fetch_timeout)
                    .send()
                    .await
                    .map_err(|e| FallbackFailure::Transport(e.to_string()))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(FallbackFailure::Status(status.as_u16()));
                }

                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| FallbackFailure::Transport(e.to_string()))?;

                Ok(format!("data:image/jpeg;base64,{}", BASE64.encode(&bytes)))
            }
        }
    }
}
