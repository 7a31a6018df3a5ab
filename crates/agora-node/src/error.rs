//! Error types for the node.

use thiserror::Error;

/// Result type for node operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in node operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Report store error (write or read)
    #[error("Store error: {0}")]
    Store(#[from] agora_journal::StoreError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rocksdb::Error> for Error {
    fn from(e: rocksdb::Error) -> Self {
        Error::Store(agora_journal::StoreError::Storage(e.to_string()))
    }
}
