use secrecy::SecretString;

use crate::error::ImagineError;
use crate::fallback::FallbackProvider;
use crate::primary::PrimaryProvider;
use crate::types::{ImageSource, ImagineRequest, ImagineResponse};

/// Image generation server implementing the degrade path
///
/// A request makes at most two ordered attempts: the primary provider
/// under its deadline, then the fallback. Attempts are strictly
/// sequential and never retried; the fallback is only reached after
/// the primary has definitively failed or when no primary credential
/// is configured at all.
pub struct Server {
    primary: Option<PrimaryProvider>,
    fallback: FallbackProvider,
}

impl Server {
    /// Generate an image for the request
    ///
    /// # Errors
    ///
    /// Returns `MissingPrompt` before contacting any provider when the
    /// trimmed prompt is empty, and `Exhausted` when the fallback
    /// itself fails (embed mode only). Primary failures are recovered
    /// locally and never surface here.
    pub async fn generate(&self, request: &ImagineRequest) -> crate::error::Result<ImagineResponse> {
        let prompt = request.prompt.trim();
        if prompt.is_empty() {
            return Err(ImagineError::MissingPrompt);
        }

        if let Some(primary) = &self.primary {
            match primary.generate(prompt, request.aspect_ratio.as_deref()).await {
                Ok(payload) => {
                    return Ok(ImagineResponse {
                        success: true,
                        image: format!("data:image/png;base64,{payload}"),
                        source: ImageSource::Primary,
                    });
                }
                Err(failure) => {
                    // Swallowed: the caller never sees a partial
                    // primary result.
                    tracing::warn!(error = %failure, "primary image provider failed, degrading to fallback");
                }
            }
        } else {
            tracing::debug!("no primary image credential configured, using fallback directly");
        }

        let image = self.fallback.deliver(prompt).await.map_err(|failure| {
            tracing::error!(error = %failure, "fallback image provider failed");
            ImagineError::Exhausted(failure.to_string())
        })?;

        Ok(ImagineResponse {
            success: true,
            image,
            source: ImageSource::Fallback,
        })
    }
}

/// Builder for constructing the image generation server from configuration
pub struct ImagineServerBuilder<'a> {
    config: &'a prism_config::ImagineConfig,
}

impl<'a> ImagineServerBuilder<'a> {
    pub fn new(config: &'a prism_config::ImagineConfig) -> Self {
        Self { config }
    }

    /// Build the server
    ///
    /// A missing primary API key is a handled runtime condition, not
    /// an error: the server then degrades every request directly.
    pub fn build(self) -> Server {
        let primary = resolve_api_key(&self.config.primary)
            .map(|api_key| PrimaryProvider::new(&self.config.primary, api_key));

        if primary.is_none() {
            tracing::debug!("image generation running without a primary provider");
        }

        Server {
            fallback: FallbackProvider::new(&self.config.fallback),
            primary,
        }
    }
}

fn resolve_api_key(config: &prism_config::PrimaryImageConfig) -> Option<SecretString> {
    config.api_key.clone()
}
