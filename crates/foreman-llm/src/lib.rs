//! Request normalization and response translation for Foreman
//!
//! Turns a loosely structured incoming event into a single Bedrock
//! generation call and maps every outcome of that call onto a fixed-shape
//! HTTP response.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
#[cfg(feature = "http")]
mod handler;
pub mod normalize;
pub mod prompt;
pub mod protocol;
pub mod provider;
mod state;
pub mod translate;
pub mod types;

pub use error::LlmError;
#[cfg(feature = "http")]
pub use handler::generation_router;
pub use normalize::normalize;
pub use provider::{Provider, bedrock::BedrockProvider};
pub use state::GenerationState;
pub use translate::{Outcome, translate};
pub use types::{EventPayload, GenerationParams, GenerationRequest};
