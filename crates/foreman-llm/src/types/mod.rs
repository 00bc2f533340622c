//! Request-scoped value types

mod event;
mod request;

pub use event::EventPayload;
pub use request::{GenerationParams, GenerationRequest};
