use serde_json::Value;

/// Sampling parameters passed through to the model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    /// Maximum tokens to generate
    pub max_tokens: i64,
    /// Sampling temperature
    pub temperature: f64,
    /// Nucleus sampling threshold (`p`)
    pub nucleus_p: f64,
    /// Top-k sampling cutoff (`k`), 0 disables it
    pub top_k: i64,
}

impl GenerationParams {
    pub const DEFAULT_MAX_TOKENS: i64 = 600;
    pub const DEFAULT_TEMPERATURE: f64 = 0.4;
    pub const DEFAULT_NUCLEUS_P: f64 = 0.9;
    pub const DEFAULT_TOP_K: i64 = 0;
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            temperature: Self::DEFAULT_TEMPERATURE,
            nucleus_p: Self::DEFAULT_NUCLEUS_P,
            top_k: Self::DEFAULT_TOP_K,
        }
    }
}

/// Normalized unit of work sent to the upstream model
///
/// `prompt` is never empty once normalization succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Final prompt text
    pub prompt: String,
    /// Generation parameters
    pub params: GenerationParams,
    /// Prior turns, forwarded verbatim when the caller supplied an array
    pub chat_history: Option<Vec<Value>>,
}
