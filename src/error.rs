//! Error types for kvqueue
//!
//! Only local misuse and infrastructure failures are errors. A store that
//! rejects an operation (empty queue, wrong password, ...) is reported through
//! [`CommandResult`](crate::command::CommandResult), never through this type.

use thiserror::Error;

/// Result type alias using KvqError
pub type Result<T> = std::result::Result<T, KvqError>;

/// Unified error type for kvqueue operations
#[derive(Debug, Error)]
pub enum KvqError {
    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session not connected: {0}")]
    NotConnected(String),

    // -------------------------------------------------------------------------
    // Snapshot Errors
    // -------------------------------------------------------------------------
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KvqError {
    /// Shorthand for a [`KvqError::InvalidArgument`]
    pub fn invalid(message: impl Into<String>) -> Self {
        KvqError::InvalidArgument(message.into())
    }

    /// True for caller mistakes that never reached the store
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, KvqError::InvalidArgument(_))
    }

    /// True when the session or its transport could not be used
    pub fn is_io(&self) -> bool {
        matches!(self, KvqError::Io(_) | KvqError::NotConnected(_))
    }
}

impl From<bincode::Error> for KvqError {
    fn from(e: bincode::Error) -> Self {
        KvqError::Serialization(e.to_string())
    }
}
