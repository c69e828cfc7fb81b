//! Validation error types shared across the workspace.

use thiserror::Error;

/// Validation failures for word/vector pairs.
///
/// Raised before data reaches storage so that a malformed pair never lands
/// on disk. Downstream crates convert these into their own error types.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The word is empty.
    #[error("Empty word not allowed")]
    EmptyWord,

    /// Vector length differs from the model dimension.
    #[error("Invalid dimension for '{word}': expected {expected}, got {actual}")]
    InvalidDimension {
        /// The word whose vector failed validation
        word: String,
        /// Dimension declared by the model
        expected: usize,
        /// Actual vector length
        actual: usize,
    },

    /// Vector contains NaN or Infinity at a specific index.
    #[error("Non-finite value in vector for '{word}' at index {index}: {value}")]
    NonFiniteValue {
        /// The word whose vector failed validation
        word: String,
        /// Index of the offending component
        index: usize,
        /// The offending value
        value: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_word_message() {
        let msg = ValidationError::EmptyWord.to_string();
        assert!(msg.contains("Empty word"));
    }

    #[test]
    fn test_invalid_dimension_message() {
        let err = ValidationError::InvalidDimension {
            word: "toronto".to_string(),
            expected: 300,
            actual: 299,
        };
        let msg = err.to_string();
        assert!(msg.contains("toronto"));
        assert!(msg.contains("300"));
        assert!(msg.contains("299"));
    }

    #[test]
    fn test_non_finite_value_message() {
        let err = ValidationError::NonFiniteValue {
            word: "toronto".to_string(),
            index: 7,
            value: f32::NAN,
        };
        let msg = err.to_string();
        assert!(msg.contains("toronto"));
        assert!(msg.contains('7'));
    }
}
