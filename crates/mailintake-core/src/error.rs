//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No submission type with this name is configured.
    #[error("Unknown submission type: {0}")]
    UnknownSubmissionType(String),

    /// The mailbox backend failed.
    #[error("Mailbox error: {0}")]
    Mailbox(String),

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
