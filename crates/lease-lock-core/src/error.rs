//! Error types for lease lock operations.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during lock operations.
#[derive(Error, Debug)]
pub enum LockError {
    /// Lock acquisition timed out.
    ///
    /// Also returned when a zero timeout allowed a single attempt and the
    /// key was held by someone else.
    #[error("lock acquisition timed out after {0:?}")]
    Timeout(Duration),

    /// Lock acquisition was cancelled.
    #[error("lock operation was cancelled")]
    Cancelled,

    /// Store connection failed.
    #[error("connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A stored value could not be decoded as a lease timestamp.
    #[error("invalid lease stored at {key:?}: {value:?}")]
    InvalidLease { key: String, value: String },

    /// Invalid lock name or configuration.
    #[error("invalid lock name: {0}")]
    InvalidName(String),

    /// Store-specific error.
    #[error("backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LockError {
    /// Returns `true` for the "try again later" outcome of an acquisition.
    pub fn is_timeout(&self) -> bool {
        matches!(self, LockError::Timeout(_))
    }
}

/// Result type for lock operations.
pub type LockResult<T> = Result<T, LockError>;
