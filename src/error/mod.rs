//! Error handling module for ClipGate

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for ClipGate operations
#[derive(Error, Debug)]
pub enum ClipGateError {
    /// Error raised by the validation core
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Settings could not be read or are inconsistent
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// Report rendering failed
    #[error("Failed to render output: {message}")]
    OutputError { message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type alias for ClipGate operations
pub type ClipGateResult<T> = std::result::Result<T, ClipGateError>;
