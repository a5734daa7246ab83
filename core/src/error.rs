//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` and `Validation` get dedicated variants because callers branch
//! on them: a missing record and a rejected write are both expected outcomes.
//! Every other non-success response lands in `HttpError` with the raw status
//! and body.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400 with a field-to-messages map.
    #[error("validation failed: {0:?}")]
    Validation(ValidationErrors),

    /// Any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
