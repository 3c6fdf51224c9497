//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use prism_config::{
    ChatConfig, Config, CorsConfig, FallbackImageConfig, FallbackPolicy, ImagineConfig, PrimaryImageConfig,
    ServerConfig,
};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                chat: ChatConfig::default(),
                imagine: ImagineConfig::default(),
                telemetry: None,
            },
        }
    }

    /// Point the chat relay at a mock backend with a test key
    pub fn with_chat(mut self, base_url: &str) -> Self {
        self.config.chat = ChatConfig {
            api_key: Some(SecretString::from("test-key")),
            base_url: Some(base_url.parse().expect("valid URL")),
            ..ChatConfig::default()
        };
        self
    }

    /// Point the primary image provider at a mock backend with a test key
    pub fn with_primary(mut self, base_url: &str, deadline_secs: u64) -> Self {
        self.config.imagine.primary = PrimaryImageConfig {
            api_key: Some(SecretString::from("test-key")),
            base_url: Some(base_url.parse().expect("valid URL")),
            deadline_secs,
            ..PrimaryImageConfig::default()
        };
        self
    }

    /// Point the fallback provider at a mock backend under a policy
    pub fn with_fallback(mut self, base_url: &str, policy: FallbackPolicy) -> Self {
        self.config.imagine.fallback = FallbackImageConfig {
            base_url: base_url.parse().expect("valid URL"),
            policy,
            ..FallbackImageConfig::default()
        };
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
