//! Input normalization: incoming event to [`GenerationRequest`]
//!
//! Every recognized payload field is enumerated here with its type and
//! default, and validated before the request is built. Coercion failures
//! are reported, never silently defaulted.

use serde_json::{Map, Value};

use crate::error::LlmError;
use crate::prompt::StructuredPromptFields;
use crate::types::{EventPayload, GenerationParams, GenerationRequest};

/// Normalize an incoming event into a generation request
///
/// Pure function of its input.
///
/// # Errors
///
/// Returns `InvalidEventType` or `MalformedBody` when the event cannot be
/// unwrapped, `InvalidParameter` when a field has the wrong type, and
/// `MissingPromptOrFields` when no prompt can be resolved
pub fn normalize(event: &Value) -> Result<GenerationRequest, LlmError> {
    let payload = EventPayload::classify(event).resolve()?;
    let fields = PayloadFields(&payload);

    let raw_prompt = fields.text("prompt", "")?;
    let structured = StructuredPromptFields {
        task: fields.text("task", "")?,
        process: fields.text("process", "")?,
        issue: fields.text("issue", "")?,
        constraints: fields.text("constraints", "")?,
        audience: fields.text("audience", StructuredPromptFields::DEFAULT_AUDIENCE)?,
        tone: fields.text("tone", StructuredPromptFields::DEFAULT_TONE)?,
    };

    let prompt = if raw_prompt.is_empty() {
        if !structured.is_usable() {
            return Err(LlmError::MissingPromptOrFields);
        }
        structured.render()
    } else {
        raw_prompt
    };

    let params = GenerationParams {
        max_tokens: fields.integer("max_tokens", GenerationParams::DEFAULT_MAX_TOKENS)?,
        temperature: fields.real("temperature", GenerationParams::DEFAULT_TEMPERATURE)?,
        nucleus_p: fields.real("p", GenerationParams::DEFAULT_NUCLEUS_P)?,
        top_k: fields.integer("k", GenerationParams::DEFAULT_TOP_K)?,
    };

    let chat_history = match payload.get("chat_history") {
        Some(Value::Array(turns)) => Some(turns.clone()),
        _ => None,
    };

    Ok(GenerationRequest {
        prompt,
        params,
        chat_history,
    })
}

/// Typed accessors over a structured payload
struct PayloadFields<'a>(&'a Map<String, Value>);

impl PayloadFields<'_> {
    /// Text field, trimmed
    ///
    /// Missing, `null` and empty values take the default. Any other
    /// non-string is rejected, including `false`, `0`, `[]` and `{}`.
    fn text(&self, key: &'static str, default: &str) -> Result<String, LlmError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(default.trim().to_owned()),
            Some(Value::String(s)) if s.is_empty() => Ok(default.trim().to_owned()),
            Some(Value::String(s)) => Ok(s.trim().to_owned()),
            Some(_) => Err(invalid(key, "a string")),
        }
    }

    /// Integer field
    ///
    /// Fractional numbers truncate toward zero; numeric strings are parsed.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn integer(&self, key: &'static str, default: i64) -> Result<i64, LlmError> {
        const EXPECTED: &str = "an integer";

        match self.0.get(key) {
            None => Ok(default),
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    return Ok(i);
                }
                n.as_f64()
                    .filter(|f| f.is_finite() && f.trunc() >= i64::MIN as f64 && f.trunc() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
                    .ok_or_else(|| invalid(key, EXPECTED))
            }
            Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid(key, EXPECTED)),
            Some(_) => Err(invalid(key, EXPECTED)),
        }
    }

    /// Finite real field; numeric strings are parsed
    fn real(&self, key: &'static str, default: f64) -> Result<f64, LlmError> {
        const EXPECTED: &str = "a number";

        let value = match self.0.get(key) {
            None => return Ok(default),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(_) => None,
        };

        value.filter(|f| f.is_finite()).ok_or_else(|| invalid(key, EXPECTED))
    }
}

const fn invalid(field: &'static str, expected: &'static str) -> LlmError {
    LlmError::InvalidParameter { field, expected }
}
