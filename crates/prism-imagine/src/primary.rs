use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Aspect ratio used when the caller supplies none
const DEFAULT_ASPECT_RATIO: &str = "1:1";

/// Failure of the primary attempt
///
/// Never surfaced to the caller; logged before the degrader switches
/// to the fallback provider.
#[derive(Debug, Error)]
pub(crate) enum PrimaryFailure {
    /// Network error or deadline exceeded (reqwest reports the
    /// request-level timeout as a transport error)
    #[error("transport error: {0}")]
    Transport(String),

    /// Well-formed error response from the provider
    #[error("provider returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Success response with no usable prediction
    #[error("provider returned no predictions")]
    Empty,
}

/// Credentialed primary image provider (Imagen `:predict`)
pub(crate) struct PrimaryProvider {
    client: Client,
    api_key: SecretString,
    base_url: Url,
    model: String,
    deadline: Duration,
}

/// Wire format for the `:predict` request
#[derive(Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: String,
}

/// Wire format for the `:predict` response
#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    #[serde(default)]
    bytes_base64_encoded: Option<String>,
}

impl PrimaryProvider {
    /// Create from configuration; `api_key` has already been checked
    /// for presence by the builder
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded default base URL is invalid (should never happen).
    pub fn new(config: &prism_config::PrimaryImageConfig, api_key: SecretString) -> Self {
        let base_url = config.base_url.clone().unwrap_or_else(|| {
            Url::parse(prism_config::DEFAULT_GOOGLE_BASE_URL).expect("valid default URL")
        });

        Self {
            client: Client::new(),
            api_key,
            base_url,
            model: config.model.clone(),
            deadline: Duration::from_secs(config.deadline_secs),
        }
    }

    /// Build the `:predict` endpoint URL
    fn predict_url(&self, api_key: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/models/{}:predict?key={api_key}", self.model)
    }

    /// Request one image, returning its base64 payload
    ///
    /// The request carries a timeout equal to the configured deadline;
    /// reqwest aborts the in-flight connection when it elapses, so a
    /// hanging provider cannot hold the handler past the bound.
    pub async fn generate(
        &self,
        prompt: &str,
        aspect_ratio: Option<&str>,
    ) -> std::result::Result<String, PrimaryFailure> {
        let wire_request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: aspect_ratio.unwrap_or(DEFAULT_ASPECT_RATIO).to_string(),
            },
        };

        let url = self.predict_url(self.api_key.expose_secret());

        tracing::debug!(model = %self.model, deadline = ?self.deadline, "sending primary image request");

        let response = self
            .client
            .post(&url)
            .timeout(self.deadline)
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| PrimaryFailure::Transport(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            // A 404 here usually means the key is not whitelisted for
            // the image model; it degrades like any other failure.
            return Err(PrimaryFailure::Status {
                status: status.as_u16(),
                message,
            });
        }

        let wire_response: PredictResponse = response
            .json()
            .await
            .map_err(|e| PrimaryFailure::Transport(format!("failed to parse response: {e}")))?;

        wire_response
            .predictions
            .into_iter()
            .find_map(|prediction| prediction.bytes_base64_encoded.filter(|payload| !payload.is_empty()))
            .ok_or(PrimaryFailure::Empty)
    }
}
