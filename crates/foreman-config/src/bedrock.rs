use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Region used when neither the file nor `BEDROCK_REGION` sets one
pub const DEFAULT_REGION: &str = "us-west-2";

/// Model used when neither the file nor `MODEL_ID` sets one
pub const DEFAULT_MODEL_ID: &str = "cohere.command-r-v1:0";

/// AWS Bedrock upstream configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BedrockConfig {
    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,
    /// Model invoked for every request
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Access key ID (optional, uses default credential chain if absent)
    #[serde(default)]
    pub access_key_id: Option<SecretString>,
    /// Secret access key
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,
    /// Endpoint override, e.g. a VPC endpoint or a local stand-in
    #[serde(default)]
    pub endpoint_url: Option<Url>,
    /// Operation timeout for the invoke call (e.g. "30s")
    #[serde(default)]
    pub timeout: Option<String>,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            model_id: default_model_id(),
            access_key_id: None,
            secret_access_key: None,
            endpoint_url: None,
            timeout: None,
        }
    }
}

impl BedrockConfig {
    /// Parsed operation timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is not a valid duration string
    pub fn timeout_duration(&self) -> anyhow::Result<Option<Duration>> {
        self.timeout
            .as_deref()
            .map(|raw| {
                duration_str::parse(raw).map_err(|e| anyhow::anyhow!("invalid bedrock.timeout '{raw}': {e}"))
            })
            .transpose()
    }
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_model_id() -> String {
    DEFAULT_MODEL_ID.to_string()
}
