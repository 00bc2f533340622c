//! AWS Bedrock provider using the native `InvokeModel` API

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_smithy_types::Blob;
use foreman_config::BedrockConfig;
use secrecy::ExposeSecret;

use super::Provider;
use crate::error::LlmError;
use crate::protocol::cohere::CohereChatRequest;
use crate::types::GenerationRequest;

const JSON_CONTENT_TYPE: &str = "application/json";

/// AWS Bedrock provider bound to a single model
pub struct BedrockProvider {
    name: String,
    model_id: String,
    client: BedrockClient,
}

impl BedrockProvider {
    /// Create from Bedrock configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout setting cannot be parsed
    pub async fn new(config: &BedrockConfig) -> anyhow::Result<Self> {
        let client = build_bedrock_client(config).await?;

        Ok(Self::from_client(config.model_id.clone(), client))
    }

    /// Wrap an already-built client
    pub fn from_client(model_id: String, client: BedrockClient) -> Self {
        Self {
            name: "bedrock".to_owned(),
            model_id,
            client,
        }
    }
}

/// Build a Bedrock runtime client from configuration
///
/// Retries are disabled so that each invocation makes exactly one call.
async fn build_bedrock_client(config: &BedrockConfig) -> anyhow::Result<BedrockClient> {
    let mut aws_config_builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .retry_config(RetryConfig::disabled());

    // Use explicit credentials if provided, otherwise fall back to default chain
    if let (Some(access_key), Some(secret_key)) = (&config.access_key_id, &config.secret_access_key) {
        let credentials = aws_credential_types::Credentials::new(
            access_key.expose_secret(),
            secret_key.expose_secret(),
            None, // session token
            None, // expiry
            "foreman-config",
        );
        aws_config_builder = aws_config_builder.credentials_provider(credentials);
    }

    if let Some(endpoint_url) = &config.endpoint_url {
        aws_config_builder = aws_config_builder.endpoint_url(endpoint_url.as_str().trim_end_matches('/'));
    }

    if let Some(timeout) = config.timeout_duration()? {
        aws_config_builder =
            aws_config_builder.timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build());
    }

    let aws_config = aws_config_builder.load().await;

    tracing::debug!(region = %config.region, model_id = %config.model_id, "bedrock client configured");

    Ok(BedrockClient::new(&aws_config))
}

#[async_trait]
impl Provider for BedrockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn invoke(&self, request: &GenerationRequest) -> Result<serde_json::Value, LlmError> {
        let body = serde_json::to_vec(&CohereChatRequest::from(request))
            .map_err(|e| LlmError::Upstream(format!("failed to encode request: {e}")))?;

        let output = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type(JSON_CONTENT_TYPE)
            .accept(JSON_CONTENT_TYPE)
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "bedrock invoke_model failed");
                LlmError::Upstream(e.to_string())
            })?;

        serde_json::from_slice(output.body().as_ref()).map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "bedrock returned a non-JSON body");
            LlmError::Upstream(format!("failed to decode response body: {e}"))
        })
    }
}
