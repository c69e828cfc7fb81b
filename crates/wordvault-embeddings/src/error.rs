//! Error types for the embedding pipeline.

use thiserror::Error;
use wordvault_storage::StorageError;

/// Errors from model-file parsing.
///
/// Every variant carries the zero-based entry index where parsing stopped,
/// so a corrupt multi-gigabyte file can be diagnosed without re-reading it.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The header line is not `"<vocab_size> <dimension>"` with both
    /// values non-zero.
    #[error("Malformed header line: {line:?}")]
    MalformedHeader {
        /// The offending header line
        line: String,
    },

    /// The file ended before the declared number of entries was read.
    #[error("Unexpected end of file at entry {index}")]
    UnexpectedEof {
        /// Zero-based index of the entry being read
        index: u64,
    },

    /// A word failed validation (invalid UTF-8, empty, embedded NUL).
    #[error("Malformed word at entry {index}: {reason}")]
    MalformedWord {
        /// Zero-based index of the entry being read
        index: u64,
        /// What was wrong with the word bytes
        reason: String,
    },

    /// A text-format vector component did not parse as a float.
    #[error("Malformed value at entry {index}: {token:?}")]
    MalformedValue {
        /// Zero-based index of the entry being read
        index: u64,
        /// The token that failed to parse
        token: String,
    },

    /// A text-format row had the wrong number of components.
    #[error("Entry {index} has {actual} components, expected {expected}")]
    WrongComponentCount {
        /// Zero-based index of the entry being read
        index: u64,
        /// Dimension declared by the header
        expected: usize,
        /// Components found on the row
        actual: usize,
    },

    /// Underlying I/O failure (including gzip decoding).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors for the embedding retrieval pipeline.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Requested model name is not in the registry.
    #[error("'{name}' is not a valid pretrained model. Valid options: {valid:?}")]
    UnknownModel {
        /// The name that was requested
        name: String,
        /// Names the registry does know
        valid: Vec<&'static str>,
    },

    /// The model file's header disagrees with the registry dimension.
    #[error("Model '{model}' declares dimension {actual}, registry expects {expected}")]
    DimensionMismatch {
        /// Registry name of the model
        model: String,
        /// Dimension from the registry
        expected: usize,
        /// Dimension from the file header
        actual: usize,
    },

    /// The server answered with a non-success status.
    #[error("Download of '{url}' failed with HTTP status {status}")]
    DownloadFailed {
        /// URL that was requested
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid caller-supplied options.
    #[error("Invalid options: {message}")]
    InvalidOptions {
        /// What was wrong
        message: String,
    },

    /// Model file parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Vector store operation failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// File I/O error outside of parsing.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EmbeddingError {
    /// Whether this error indicates corrupt data rather than a recoverable
    /// failure (mirrors [`StorageError::is_corruption`]).
    pub fn is_corruption(&self) -> bool {
        match self {
            EmbeddingError::Parse(_) => true,
            EmbeddingError::DimensionMismatch { .. } => true,
            EmbeddingError::Storage(e) => e.is_corruption(),
            _ => false,
        }
    }
}

/// Convenient Result type for embedding operations.
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_model_lists_valid_names() {
        let err = EmbeddingError::UnknownModel {
            name: "glove".to_string(),
            valid: vec!["google_news"],
        };
        let msg = err.to_string();
        assert!(msg.contains("glove"));
        assert!(msg.contains("google_news"));
    }

    #[test]
    fn test_parse_error_carries_entry_index() {
        let err = ParseError::UnexpectedEof { index: 2_999_999 };
        assert!(err.to_string().contains("2999999"));
    }

    #[test]
    fn test_parse_errors_classify_as_corruption() {
        let err: EmbeddingError = ParseError::MalformedHeader {
            line: "not a header".to_string(),
        }
        .into();
        assert!(err.is_corruption());
    }

    #[test]
    fn test_download_failed_is_not_corruption() {
        let err = EmbeddingError::DownloadFailed {
            url: "https://example.com/model.bin.gz".to_string(),
            status: 503,
        };
        assert!(!err.is_corruption());
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_storage_corruption_passes_through() {
        let err: EmbeddingError = StorageError::CorruptVector {
            word: "w".to_string(),
            details: "short".to_string(),
        }
        .into();
        assert!(err.is_corruption());

        let err: EmbeddingError = StorageError::WriteFailed("disk full".to_string()).into();
        assert!(!err.is_corruption());
    }
}
