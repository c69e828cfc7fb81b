//! Shared foundation for the wordvault workspace.
//!
//! Provides the pieces every other crate needs:
//!
//! - [`paths::DataRoot`]: resolution of the per-user data directory and the
//!   layout of downloads and vector stores underneath it
//! - [`error::ValidationError`]: typed validation failures for words and
//!   vectors before they reach storage
//! - [`validate_vector`]: the single validation routine applied to every
//!   word/vector pair on its way into a store

pub mod error;
pub mod paths;

pub use error::ValidationError;
pub use paths::DataRoot;

/// Validate a word/vector pair before it is written to a store.
///
/// # Errors
/// - [`ValidationError::EmptyWord`] if the word is empty
/// - [`ValidationError::InvalidDimension`] if the vector length differs from
///   `expected_dimension`
/// - [`ValidationError::NonFiniteValue`] if any component is NaN or infinite
pub fn validate_vector(
    word: &str,
    expected_dimension: usize,
    vector: &[f32],
) -> Result<(), ValidationError> {
    if word.is_empty() {
        return Err(ValidationError::EmptyWord);
    }
    if vector.len() != expected_dimension {
        return Err(ValidationError::InvalidDimension {
            word: word.to_string(),
            expected: expected_dimension,
            actual: vector.len(),
        });
    }
    if let Some((index, value)) = vector
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite())
        .map(|(i, v)| (i, *v))
    {
        return Err(ValidationError::NonFiniteValue {
            word: word.to_string(),
            index,
            value,
        });
    }
    Ok(())
}
