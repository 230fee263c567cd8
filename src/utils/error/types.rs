//! Error types for the ACL service

use thiserror::Error;

/// Result type alias for the ACL service
pub type Result<T> = std::result::Result<T, AclError>;

/// Main error type for the ACL service
#[derive(Error, Debug)]
pub enum AclError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource metadata is missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store unavailable or write rejected
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Stored ACL changed since the editor read it
    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),

    /// Resource already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Requester lacks the required action
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// No usable principal on the request
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Payload failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
