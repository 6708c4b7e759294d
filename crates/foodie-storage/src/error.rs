//! Storage error types.

use thiserror::Error;

/// Errors that can occur when using the storage.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read or write the backing files.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Key cannot be used with this backend.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// A writer panicked while holding the store lock.
    #[error("Storage lock poisoned: {0}")]
    Poisoned(String),
}
