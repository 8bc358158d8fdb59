//! Error types for the themes library.
//!
//! The pure operations (normalizers, query keys, matching, premium checks)
//! never fail; they degrade to safe defaults. These errors surface only from
//! entry points that accept arbitrary JSON or read configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the themes library.
#[derive(Debug, Error)]
pub enum ThemesError {
    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unknown theme source: {0}")]
    UnknownSource(String),

    // Validation errors
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for themes operations.
pub type Result<T> = std::result::Result<T, ThemesError>;

impl From<std::io::Error> for ThemesError {
    fn from(err: std::io::Error) -> Self {
        ThemesError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for ThemesError {
    fn from(err: serde_json::Error) -> Self {
        ThemesError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl ThemesError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        ThemesError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Whether the error was caused by malformed input rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ThemesError::Json { .. }
                | ThemesError::Validation { .. }
                | ThemesError::UnknownSource(_)
        )
    }
}
