//! Cache error types.

use cart_commerce::StorageError;
use thiserror::Error;

/// Errors that can occur when using a key-value backend.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Stored file is not a key-value map.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    /// Underlying file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CacheError> for StorageError {
    fn from(e: CacheError) -> Self {
        StorageError::Backend(e.to_string())
    }
}
