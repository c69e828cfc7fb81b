//! Registry of pretrained word2vec models.
//!
//! The registry is the single source of truth for where a model lives,
//! what it contains, and how large its vocabulary is. The published
//! vocabulary size drives the cache completeness check: a store holding
//! fewer words than the model publishes is considered stale and rebuilt.

use serde::Serialize;

use crate::error::{EmbeddingError, EmbeddingResult};

/// Subdirectory used for downloads and stores of this model family.
pub const MODEL_FAMILY: &str = "word2vec";

/// A pretrained model the registry knows how to retrieve.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `name` | Registry key, also used in file and store names |
/// | `url` | Published location of the model file |
/// | `file_extension` | Extension as published; `bin` selects the binary format, a `gz` suffix gzip |
/// | `dimension` | Vector dimension |
/// | `vocab_size` | Published vocabulary size, the completeness threshold |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PretrainedModel {
    /// Registry key (e.g. `"google_news"`).
    pub name: &'static str,
    /// Download URL.
    pub url: &'static str,
    /// File extension as published upstream.
    pub file_extension: &'static str,
    /// Vector dimension.
    pub dimension: usize,
    /// Published vocabulary size.
    pub vocab_size: u64,
    /// Human-readable description.
    pub description: &'static str,
}

impl PretrainedModel {
    /// File name the download is stored under.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.file_extension)
    }

    /// Directory name of this model's vector store.
    pub fn store_name(&self) -> String {
        format!("{}-{}", self.name, self.dimension)
    }

    /// Whether the model file uses the binary vector format.
    pub fn is_binary(&self) -> bool {
        self.file_extension.contains("bin")
    }

    /// Whether the model file is gzip-compressed.
    pub fn is_gzip(&self) -> bool {
        self.file_extension.ends_with("gz")
    }
}

/// All models the registry knows.
pub const PRETRAINED_MODELS: &[PretrainedModel] = &[PretrainedModel {
    name: "google_news",
    url: "https://s3.amazonaws.com/dl4j-distribution/GoogleNews-vectors-negative300.bin.gz",
    file_extension: "bin.gz",
    dimension: 300,
    vocab_size: 3_000_000,
    description: "3 million words and phrases",
}];

/// Look up a model by name.
pub fn get(name: &str) -> Option<&'static PretrainedModel> {
    PRETRAINED_MODELS.iter().find(|m| m.name == name)
}

/// Look up a model by name, failing with the list of valid options.
///
/// # Errors
/// [`EmbeddingError::UnknownModel`] naming every registered model.
pub fn resolve(name: &str) -> EmbeddingResult<&'static PretrainedModel> {
    get(name).ok_or_else(|| EmbeddingError::UnknownModel {
        name: name.to_string(),
        valid: names(),
    })
}

/// Names of all registered models.
pub fn names() -> Vec<&'static str> {
    PRETRAINED_MODELS.iter().map(|m| m.name).collect()
}
