//! Cached word-embedding retrieval.
//!
//! [`Word2VecEmbedding`] owns the vector store for one pretrained model.
//! The build path runs at most once per model version: when the store
//! holds fewer words than the model publishes, [`Word2VecEmbedding::ensure`]
//! clears it and rebuilds from the (downloaded-if-missing) model file,
//! inserting in fixed-size batches. Afterwards every lookup is a point
//! read against RocksDB.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use wordvault_core::DataRoot;
use wordvault_storage::{StoreManifest, VectorStore};

use crate::download;
use crate::error::{EmbeddingError, EmbeddingResult};
use crate::registry::{self, PretrainedModel, MODEL_FAMILY};
use crate::word2vec;

/// Default number of word/vector pairs per storage batch.
pub const DEFAULT_BATCH_SIZE: usize = 1_000;

/// Options controlling where and how a cache is built.
#[derive(Debug, Clone)]
pub struct EmbeddingOptions {
    /// Data root override; defaults to environment resolution.
    pub root: Option<PathBuf>,
    /// Render progress bars during download and build.
    pub show_progress: bool,
    /// Word/vector pairs per storage batch. Must be non-zero.
    pub batch_size: usize,
}

impl Default for EmbeddingOptions {
    fn default() -> Self {
        Self {
            root: None,
            show_progress: true,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Outcome of an [`ensure`](Word2VecEmbedding::ensure) or
/// [`load_from_file`](Word2VecEmbedding::load_from_file) call.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Entries parsed and written during this call.
    pub inserted: u64,
    /// Vocabulary count after the call.
    pub total: u64,
    /// True when the store was already complete and nothing was done.
    pub skipped: bool,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// A pretrained word2vec model backed by a local vector store.
pub struct Word2VecEmbedding {
    model: PretrainedModel,
    store: VectorStore,
    root: DataRoot,
    show_progress: bool,
    batch_size: usize,
}

impl Word2VecEmbedding {
    /// Open the store for a registered model.
    ///
    /// Opening never triggers a download or build; call
    /// [`ensure`](Self::ensure) for that.
    ///
    /// # Errors
    /// * `EmbeddingError::UnknownModel` - name not in the registry
    /// * `EmbeddingError::InvalidOptions` - zero batch size
    /// * `EmbeddingError::Storage` - store open failure
    pub fn open(name: &str, options: EmbeddingOptions) -> EmbeddingResult<Self> {
        let model = *registry::resolve(name)?;
        Self::open_model(model, options)
    }

    /// Open the store for an explicit model definition.
    pub fn open_model(
        model: PretrainedModel,
        options: EmbeddingOptions,
    ) -> EmbeddingResult<Self> {
        if options.batch_size == 0 {
            return Err(EmbeddingError::InvalidOptions {
                message: "batch_size must be non-zero".to_string(),
            });
        }

        let root = options
            .root
            .map(DataRoot::at)
            .unwrap_or_else(DataRoot::resolve);
        let store_path = root.store_path(MODEL_FAMILY, &model.store_name())?;
        let store = VectorStore::open(
            &store_path,
            StoreManifest::new(model.name, model.dimension),
        )?;

        Ok(Self {
            model,
            store,
            root,
            show_progress: options.show_progress,
            batch_size: options.batch_size,
        })
    }

    /// The model this cache serves.
    pub fn model(&self) -> &PretrainedModel {
        &self.model
    }

    /// Directory of the underlying store.
    pub fn store_path(&self) -> &str {
        self.store.path()
    }

    /// Number of words currently cached.
    pub fn vocab_count(&self) -> EmbeddingResult<u64> {
        Ok(self.store.vocab_count()?)
    }

    /// Whether the cache holds at least the published vocabulary size.
    pub fn is_complete(&self) -> EmbeddingResult<bool> {
        Ok(self.store.vocab_count()? >= self.model.vocab_size)
    }

    /// Look up the vector for a word. `None` for out-of-vocabulary words.
    pub fn lookup(&self, word: &str) -> EmbeddingResult<Option<Vec<f32>>> {
        Ok(self.store.get(word)?)
    }

    /// Drop all cached vectors.
    pub fn clear(&self) -> EmbeddingResult<()> {
        Ok(self.store.clear()?)
    }

    /// Make the cache complete, downloading and rebuilding if needed.
    ///
    /// A complete cache returns immediately with `skipped = true`. An
    /// incomplete one (fresh, or left behind by an interrupted build) is
    /// cleared and rebuilt from scratch, so the store never mixes entries
    /// from different build attempts.
    pub async fn ensure(&self) -> EmbeddingResult<BuildReport> {
        let count = self.store.vocab_count()?;
        if count >= self.model.vocab_size {
            debug!(
                model = self.model.name,
                count, "Cache complete, skipping build"
            );
            return Ok(BuildReport {
                inserted: 0,
                total: count,
                skipped: true,
                elapsed: Duration::ZERO,
            });
        }

        if count > 0 {
            warn!(
                model = self.model.name,
                count,
                expected = self.model.vocab_size,
                "Cache incomplete, rebuilding"
            );
        }
        self.store.clear()?;

        let file = download::ensure_file(&self.model, &self.root, self.show_progress).await?;
        self.load_from_file(&file)
    }

    /// Build the cache from a local model file.
    ///
    /// Parses sequentially and writes in batches of `batch_size`; the last
    /// partial batch is flushed at the end. The file header's dimension
    /// must match the registry dimension; its vocabulary count drives the
    /// progress bar (the published size still decides completeness).
    pub fn load_from_file(&self, path: &std::path::Path) -> EmbeddingResult<BuildReport> {
        let start = Instant::now();
        let mut reader = word2vec::open_model_file(path, self.model.file_extension)?;

        let header = *reader.header();
        if header.dimension != self.model.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                model: self.model.name.to_string(),
                expected: self.model.dimension,
                actual: header.dimension,
            });
        }

        info!(
            model = self.model.name,
            vocab = header.vocab_size,
            dimension = header.dimension,
            "Building vector cache"
        );

        let progress = if self.show_progress {
            let pb = ProgressBar::new(header.vocab_size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut batch: Vec<(String, Vec<f32>)> = Vec::with_capacity(self.batch_size);
        let mut inserted: u64 = 0;

        for entry in &mut reader {
            batch.push(entry?);
            if batch.len() == self.batch_size {
                self.store.insert_batch(&batch)?;
                inserted += batch.len() as u64;
                if let Some(pb) = &progress {
                    pb.inc(batch.len() as u64);
                }
                batch.clear();
            }
        }
        if !batch.is_empty() {
            self.store.insert_batch(&batch)?;
            inserted += batch.len() as u64;
            if let Some(pb) = &progress {
                pb.inc(batch.len() as u64);
            }
        }

        self.store.flush()?;
        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        let total = self.store.vocab_count()?;
        let elapsed = start.elapsed();
        info!(
            model = self.model.name,
            inserted,
            total,
            elapsed_ms = elapsed.as_millis() as u64,
            "Vector cache built"
        );
        Ok(BuildReport {
            inserted,
            total,
            skipped: false,
            elapsed,
        })
    }
}
