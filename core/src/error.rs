//! Error types for the CyREST client.
//!
//! # Design
//! The two failures CyREST itself can report are kept apart: `Decode` when
//! the body is not an envelope at all, `Api` when the envelope lists errors.
//! The HTTP status is recorded on both for debugging but never decides which
//! one is returned. Transport failures pass through as `ureq`'s own error.

use serde_json::Value;
use thiserror::Error;

use crate::envelope::EnvelopeError;
use crate::types::CiError;

/// Errors returned by `CyCaller`.
#[derive(Debug, Error)]
pub enum CyRestError {
    /// The response body is not a `{data, errors}` JSON envelope. `content`
    /// is the body as received, except that bytes which are not valid UTF-8
    /// have been replaced with U+FFFD.
    #[error("failed to parse json from {content}")]
    Decode {
        status: u16,
        content: String,
        #[source]
        source: EnvelopeError,
    },

    /// The envelope's `errors` array was non-empty.
    #[error("cyrest returned errors: {}", render(.errors))]
    Api { status: u16, errors: Vec<Value> },

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] ureq::Error),

    /// A typed request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The `data` payload did not match the requested type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl CyRestError {
    /// The raw `errors` array for `Api` failures.
    pub fn errors(&self) -> Option<&[Value]> {
        match self {
            CyRestError::Api { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Entries of an `Api` failure that follow the CI error format. Entries in
    /// any other shape are skipped.
    pub fn ci_errors(&self) -> Vec<CiError> {
        self.errors()
            .unwrap_or_default()
            .iter()
            .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
            .collect()
    }
}

fn render(errors: &[Value]) -> String {
    Value::Array(errors.to_vec()).to_string()
}
