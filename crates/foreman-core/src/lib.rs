//! Shared types for Foreman
//!
//! Holds the HTTP-facing error contract and the fixed-shape response
//! envelope that every pipeline branch terminates in.

#![allow(clippy::must_use_candidate)]

mod error;
mod response;

pub use error::HttpError;
pub use response::{ErrorBody, OutwardResponse, SuccessBody};
