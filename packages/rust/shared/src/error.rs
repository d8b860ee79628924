//! Error types for kwgroup.
//!
//! Library crates use [`KwgroupError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Grouping and URL generation are total and never produce errors; only
//! configuration, file I/O, and report (de)serialization can fail.

use std::path::PathBuf;

/// Top-level error type for all kwgroup operations.
#[derive(Debug, thiserror::Error)]
pub enum KwgroupError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Option or report validation error (out-of-range threshold, schema mismatch).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Unusable keyword input (unreadable stream, no keywords).
    #[error("input error: {message}")]
    Input { message: String },

    /// JSON encoding/decoding error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, KwgroupError>;

impl KwgroupError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create an input error from any displayable message.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for KwgroupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
