//! Storage error types.

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Connection to the storage backend failed.
    #[error("storage connection error: {0}")]
    Connection(String),

    /// A storage operation failed.
    #[error("storage error: {0}")]
    Internal(String),

    /// The namespace or key is invalid.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
