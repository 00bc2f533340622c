#![allow(clippy::must_use_candidate)]

pub mod bedrock;
mod env;
pub mod health;
mod loader;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use bedrock::*;
pub use health::*;
pub use server::*;
pub use telemetry::*;

/// Top-level Foreman configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream Bedrock configuration
    #[serde(default)]
    pub bedrock: BedrockConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
