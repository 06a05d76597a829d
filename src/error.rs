//! Error types for the Chronos storage core.

use thiserror::Error;

/// Errors that can occur in storage operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
