//! Storage error types.
//!
//! Errors are designed for fail-fast debugging with descriptive messages.
//! Corruption-class variants are kept distinct so callers can treat them
//! more severely than recoverable failures.

use thiserror::Error;
use wordvault_core::ValidationError;

/// Storage operation errors.
///
/// Implements `std::error::Error` and `Display` via `thiserror`.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database failed to open at the specified path.
    #[error("Failed to open store at '{path}': {message}")]
    OpenFailed {
        /// The path where the open was attempted
        path: String,
        /// The underlying error message from RocksDB
        message: String,
    },

    /// Column family not found in the database.
    #[error("Column family '{name}' not found")]
    ColumnFamilyNotFound {
        /// Name of the missing column family
        name: String,
    },

    /// An existing store belongs to a different model or dimension.
    #[error(
        "Store at '{path}' holds '{found_model}' ({found_dimension}d), \
         expected '{expected_model}' ({expected_dimension}d)"
    )]
    ManifestMismatch {
        /// Store directory
        path: String,
        /// Model recorded in the existing manifest
        found_model: String,
        /// Dimension recorded in the existing manifest
        found_dimension: usize,
        /// Model the caller asked to open
        expected_model: String,
        /// Dimension the caller asked to open
        expected_dimension: usize,
    },

    /// Stored bytes do not decode to a vector of the manifest dimension.
    #[error("Corrupt vector for '{word}': {details}")]
    CorruptVector {
        /// The word whose stored value is malformed
        word: String,
        /// What was wrong with the stored bytes
        details: String,
    },

    /// Write operation failed.
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Read operation failed.
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Flush operation failed.
    #[error("Flush failed: {0}")]
    FlushFailed(String),

    /// Serialization or deserialization of metadata failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A word/vector pair failed validation before storage.
    #[error("Validation error: {0}")]
    ValidationFailed(String),

    /// Generic internal error for unexpected failures.
    #[error("Internal storage error: {0}")]
    Internal(String),
}

impl From<ValidationError> for StorageError {
    fn from(e: ValidationError) -> Self {
        StorageError::ValidationFailed(e.to_string())
    }
}

impl From<rocksdb::Error> for StorageError {
    fn from(e: rocksdb::Error) -> Self {
        StorageError::Internal(e.to_string())
    }
}

impl StorageError {
    /// Whether this error indicates on-disk corruption rather than a
    /// recoverable failure.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            StorageError::ManifestMismatch { .. }
                | StorageError::CorruptVector { .. }
                | StorageError::Serialization(_)
        )
    }
}

/// Convenient Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
