//! Error types for DAN decoding and JSON transcoding.
//!
//! Malformed DAN structure is never an error: the decoder degrades to a
//! best-effort structure instead (see [`crate::decoder`]). Errors only arise at
//! the input boundary and on the JSON side.

use thiserror::Error;

/// Errors that can occur while reading DAN input or transcoding JSON.
#[derive(Error, Debug)]
pub enum DanError {
    /// The decoder was handed a payload that is not text.
    #[error("expected UTF-8 text input: {0}")]
    InputKind(#[from] std::str::Utf8Error),

    /// The input was not valid JSON (JSON-input path).
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The JSON document parsed, but its root is not an object.
    #[error("JSON root must be an object, found {found}")]
    JsonRoot { found: &'static str },
}

/// Convenience alias used throughout dan-core.
pub type Result<T> = std::result::Result<T, DanError>;
