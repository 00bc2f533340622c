//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use foreman_config::{BedrockConfig, Config};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        let mut config = Config::default();
        config.server.listen_address = Some(SocketAddr::from(([127, 0, 0, 1], 0)));

        Self { config }
    }

    /// Point Bedrock at a mock endpoint with static credentials
    pub fn with_bedrock_endpoint(mut self, endpoint_url: &str) -> Self {
        let bedrock: &mut BedrockConfig = &mut self.config.bedrock;
        bedrock.access_key_id = Some(SecretString::from("AKIDTEST"));
        bedrock.secret_access_key = Some(SecretString::from("test-secret"));
        bedrock.endpoint_url = Some(endpoint_url.parse().expect("valid URL"));
        bedrock.timeout = Some("5s".to_owned());
        self
    }

    /// Override the model id
    pub fn with_model_id(mut self, model_id: &str) -> Self {
        self.config.bedrock.model_id = model_id.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
