// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// The uploaded file could not be probed (corrupt or unsupported)
    MediaDecode(String),
    /// Requirements configuration is inconsistent
    InvalidRequirements(String),
    /// Remote confirmation service could not be reached or answered badly
    RemoteUnavailable(String),
    /// A newer validation run replaced this one before it finished
    Superseded,
    /// File system operation failed
    FsFail(String),
    /// Internal error
    InternalError(String),
}

impl DomainError {
    /// Whether the error belongs to the decode path (no report, no history entry)
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, DomainError::MediaDecode(_))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::MediaDecode(msg) => write!(f, "Media decode failed: {}", msg),
            DomainError::InvalidRequirements(msg) => write!(f, "Invalid requirements: {}", msg),
            DomainError::RemoteUnavailable(msg) => {
                write!(f, "Remote confirmation unavailable: {}", msg)
            }
            DomainError::Superseded => write!(f, "Validation superseded by a newer run"),
            DomainError::FsFail(msg) => write!(f, "File system error: {}", msg),
            DomainError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
