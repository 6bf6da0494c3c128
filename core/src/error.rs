//! Error types for the catalog client core.
//!
//! # Design
//! 400 and 404 get dedicated variants because the view model shows their
//! server-provided message to the user as-is. Any other unexpected status
//! lands in `Http` with the server's `error` text when one could be read.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    /// The server returned 400; the message explains which fields failed.
    #[error("{0}")]
    Validation(String),

    /// The server returned 404 for the referenced item.
    #[error("{0}")]
    NotFound(String),

    /// Any other status than the one the operation expects.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be decoded into the expected envelope.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The draft form cannot be turned into a create request.
    #[error("invalid form: {0}")]
    InvalidDraft(String),
}
