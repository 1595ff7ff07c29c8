//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Threshold string could not be parsed as a number.
    #[error("failed to parse selection threshold '{value}': {source}")]
    ThresholdParseError {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Threshold parsed but is NaN or infinite.
    #[error("invalid selection threshold '{value}': must be a finite number")]
    InvalidThreshold { value: String },

    /// Document cap could not be parsed or is zero.
    #[error("invalid max documents '{value}': must be a positive integer")]
    InvalidMaxDocuments { value: String },

    /// An entity group name was set to an empty string.
    #[error("entity group for {name} cannot be empty")]
    EmptyEntityGroup { name: &'static str },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
