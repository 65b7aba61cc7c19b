//! Storage error types
//!
//! Defines all errors that can occur in the key-value and credential layers.

use thiserror::Error;

/// Errors that can occur in a key-value backend or the credential store
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// SQLite backend failure
    #[error("SQLite error: {0}")]
    Sqlite(String),

    /// Backend cannot be reached (no window, storage disabled, quota exceeded)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

#[cfg(feature = "native")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Sqlite(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
