//! Error types for the fixture tool
//!
//! Messages are written for the operator reading a terminal, with hints on
//! how to fix the most common problems.

use std::io;
use thiserror::Error;

use crate::fixture::ValidationError;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the fixture tool
#[derive(Error, Debug)]
pub enum Error {
    // === Fixture Errors ===
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown sample fixture '{name}'. Available: {available}")]
    UnknownSample { name: String, available: String },

    #[error("{failed} of {total} fixture files failed lint")]
    LintFailed { failed: usize, total: usize },

    // === Recipe Errors ===
    #[error("Recipe error: {0}")]
    Recipe(String),

    // === Harness Errors ===
    #[error("Game did not become ready within {0} ms")]
    NotReady(u64),

    #[error("Game driver error: {0}")]
    Driver(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Failed to write file '{path}': {error}")]
    FileWrite { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an unknown sample error listing the names that do exist
    pub fn unknown_sample<S: AsRef<str>>(name: &str, available: &[S]) -> Self {
        Self::UnknownSample {
            name: name.to_string(),
            available: available
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Create a file read error for `path`
    pub fn file_read(path: &std::path::Path, error: impl std::fmt::Display) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a file write error for `path`
    pub fn file_write(path: &std::path::Path, error: impl std::fmt::Display) -> Self {
        Self::FileWrite {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}
