//! Key/value encoding for the vector store.
//!
//! Vectors are stored as raw little-endian f32 bytes. The word2vec wire
//! format is also little-endian, so a build is a validation pass plus a
//! straight re-encode. Explicit per-component conversion keeps the format
//! identical on big-endian hosts.

use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

/// Meta CF key holding the JSON manifest.
pub const META_MANIFEST: &[u8] = b"manifest";

/// Meta CF key holding the u64 little-endian vocabulary counter.
pub const META_VOCAB_COUNT: &[u8] = b"vocab_count";

/// Identity of the model a store belongs to.
///
/// Written on first open and verified on every subsequent open, so a store
/// directory can never be silently reused for a different model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreManifest {
    /// Registry name of the model (e.g. `"google_news"`).
    pub model: String,
    /// Vector dimension every stored value must have.
    pub dimension: usize,
}

impl StoreManifest {
    /// Create a manifest for a model.
    pub fn new(model: impl Into<String>, dimension: usize) -> Self {
        Self {
            model: model.into(),
            dimension,
        }
    }

    /// Serialize to the bytes stored under [`META_MANIFEST`].
    pub fn to_bytes(&self) -> StorageResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Deserialize from the bytes stored under [`META_MANIFEST`].
    pub fn from_bytes(bytes: &[u8]) -> StorageResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Encode a vector as little-endian f32 bytes.
pub fn encode_vector(vector: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vector.len() * 4);
    for value in vector {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Decode a stored value back into a vector of the expected dimension.
///
/// # Errors
/// [`StorageError::CorruptVector`] if the byte length is not exactly
/// `4 * dimension`.
pub fn decode_vector(word: &str, bytes: &[u8], dimension: usize) -> StorageResult<Vec<f32>> {
    if bytes.len() != dimension * 4 {
        return Err(StorageError::CorruptVector {
            word: word.to_string(),
            details: format!("expected {} bytes, found {}", dimension * 4, bytes.len()),
        });
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Encode the vocabulary counter.
pub fn encode_count(count: u64) -> [u8; 8] {
    count.to_le_bytes()
}

/// Decode the vocabulary counter.
///
/// # Errors
/// [`StorageError::Serialization`] if the stored value is not 8 bytes.
pub fn decode_count(bytes: &[u8]) -> StorageResult<u64> {
    let array: [u8; 8] = bytes.try_into().map_err(|_| {
        StorageError::Serialization(format!(
            "vocab_count must be 8 bytes, found {}",
            bytes.len()
        ))
    })?;
    Ok(u64::from_le_bytes(array))
}
