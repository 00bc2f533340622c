use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::error::LlmError;

/// Shape of an incoming event, resolved once before any field is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPayload<'a> {
    /// Direct invoke: the event is the payload
    Structured(&'a Map<String, Value>),
    /// Proxy envelope: the payload is JSON text under `body`
    RawText(&'a str),
    /// Anything that is not a JSON object
    Invalid,
}

impl<'a> EventPayload<'a> {
    /// Classify an event
    ///
    /// A `body` key only counts as an envelope when it holds a string;
    /// otherwise the event is taken as already structured.
    pub fn classify(event: &'a Value) -> Self {
        let Value::Object(map) = event else {
            return Self::Invalid;
        };

        match map.get("body") {
            Some(Value::String(text)) => Self::RawText(text),
            _ => Self::Structured(map),
        }
    }

    /// Resolve into the structured payload
    ///
    /// # Errors
    ///
    /// Returns `InvalidEventType` for non-object events and `MalformedBody`
    /// when envelope text is not a JSON object
    pub fn resolve(self) -> Result<Cow<'a, Map<String, Value>>, LlmError> {
        match self {
            Self::Structured(map) => Ok(Cow::Borrowed(map)),
            Self::RawText(text) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(map)) => Ok(Cow::Owned(map)),
                Ok(_) => Err(LlmError::MalformedBody("Request body must be a JSON object".to_owned())),
                Err(_) => Err(LlmError::MalformedBody("Invalid JSON in request body".to_owned())),
            },
            Self::Invalid => Err(LlmError::InvalidEventType),
        }
    }
}
