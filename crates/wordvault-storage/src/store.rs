//! Core VectorStore struct and database operations.

use std::collections::HashSet;
use std::path::Path;

use rocksdb::{Cache, ColumnFamily, IteratorMode, Options, WriteBatch, DB};
use tracing::{debug, info};

use wordvault_core::validate_vector;

use crate::column_families::{self, CF_META, CF_VECTORS};
use crate::config::StoreConfig;
use crate::error::{StorageError, StorageResult};
use crate::schema::{self, StoreManifest, META_MANIFEST, META_VOCAB_COUNT};

/// Number of deletes buffered per `WriteBatch` while clearing.
const CLEAR_BATCH_SIZE: usize = 10_000;

/// RocksDB-backed word → vector store for a single model.
///
/// # Thread Safety
/// RocksDB's `DB` type is internally thread-safe, so concurrent lookups
/// through a shared reference are fine. The vocabulary counter is only
/// exact under a single writer; builds are sequential by design.
///
/// # Example
/// ```rust,ignore
/// use wordvault_storage::{StoreManifest, VectorStore};
/// use tempfile::TempDir;
///
/// let tmp = TempDir::new().unwrap();
/// let store = VectorStore::open(tmp.path(), StoreManifest::new("google_news", 300))?;
/// store.insert_batch(&[("canada".to_string(), vec![0.0; 300])])?;
/// assert_eq!(store.vocab_count()?, 1);
/// ```
pub struct VectorStore {
    /// The RocksDB database instance.
    db: DB,
    /// Shared block cache (kept alive for DB lifetime).
    #[allow(dead_code)]
    cache: Cache,
    /// Store directory for reference.
    path: String,
    /// Model identity this store was opened for.
    manifest: StoreManifest,
}

impl VectorStore {
    /// Open a store at the specified path with default configuration.
    ///
    /// Creates the database and both column families if they don't exist.
    /// On first open the manifest is written; afterwards it is verified.
    ///
    /// # Errors
    /// * `StorageError::OpenFailed` - database could not be opened
    /// * `StorageError::ManifestMismatch` - existing store belongs to a
    ///   different model or dimension
    pub fn open<P: AsRef<Path>>(path: P, manifest: StoreManifest) -> StorageResult<Self> {
        Self::open_with_config(path, manifest, StoreConfig::default())
    }

    /// Open a store with custom configuration.
    ///
    /// # Arguments
    /// * `path` - Path to the store directory
    /// * `manifest` - Model identity the store must hold
    /// * `config` - Tuning options
    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        manifest: StoreManifest,
        config: StoreConfig,
    ) -> StorageResult<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let cache = Cache::new_lru_cache(config.block_cache_size);

        let mut db_opts = Options::default();
        db_opts.create_if_missing(config.create_if_missing);
        db_opts.create_missing_column_families(true);
        db_opts.set_max_open_files(config.max_open_files);
        if !config.enable_wal {
            db_opts.set_manual_wal_flush(true);
        }

        let cf_descriptors = column_families::descriptors(&cache);

        let db = DB::open_cf_descriptors(&db_opts, &path_str, cf_descriptors).map_err(|e| {
            StorageError::OpenFailed {
                path: path_str.clone(),
                message: e.to_string(),
            }
        })?;

        let store = Self {
            db,
            cache,
            path: path_str,
            manifest,
        };
        store.verify_or_write_manifest()?;
        Ok(store)
    }

    /// Check the stored manifest against the requested one, writing it on
    /// first open.
    fn verify_or_write_manifest(&self) -> StorageResult<()> {
        let cf = self.get_cf(CF_META)?;
        match self
            .db
            .get_pinned_cf(cf, META_MANIFEST)
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?
        {
            Some(bytes) => {
                let found = StoreManifest::from_bytes(&bytes)?;
                if found != self.manifest {
                    return Err(StorageError::ManifestMismatch {
                        path: self.path.clone(),
                        found_model: found.model,
                        found_dimension: found.dimension,
                        expected_model: self.manifest.model.clone(),
                        expected_dimension: self.manifest.dimension,
                    });
                }
            }
            None => {
                self.db
                    .put_cf(cf, META_MANIFEST, self.manifest.to_bytes()?)
                    .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
                info!(
                    model = %self.manifest.model,
                    dimension = self.manifest.dimension,
                    path = %self.path,
                    "Initialized vector store"
                );
            }
        }
        Ok(())
    }

    /// Get a reference to a column family by name.
    fn get_cf(&self, name: &str) -> StorageResult<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StorageError::ColumnFamilyNotFound {
                name: name.to_string(),
            })
    }

    /// The store directory.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The manifest this store was opened with.
    pub fn manifest(&self) -> &StoreManifest {
        &self.manifest
    }

    /// Insert a batch of word/vector pairs in a single `WriteBatch`.
    ///
    /// Every pair is validated against the manifest dimension before any
    /// write happens. Re-inserting an existing word overwrites its vector
    /// without inflating the vocabulary counter; the counter update rides
    /// in the same batch as the puts.
    ///
    /// # Returns
    /// The total vocabulary count after the batch.
    pub fn insert_batch(&self, entries: &[(String, Vec<f32>)]) -> StorageResult<u64> {
        if entries.is_empty() {
            return self.vocab_count();
        }

        let cf_vectors = self.get_cf(CF_VECTORS)?;
        let cf_meta = self.get_cf(CF_META)?;

        for (word, vector) in entries {
            validate_vector(word, self.manifest.dimension, vector)?;
        }

        let mut batch = WriteBatch::default();
        let mut seen_in_batch: HashSet<&str> = HashSet::with_capacity(entries.len());
        let mut new_words: u64 = 0;

        for (word, vector) in entries {
            let key = word.as_bytes();
            if seen_in_batch.insert(word.as_str()) {
                let exists = self
                    .db
                    .get_pinned_cf(cf_vectors, key)
                    .map_err(|e| StorageError::ReadFailed(e.to_string()))?
                    .is_some();
                if !exists {
                    new_words += 1;
                }
            }
            batch.put_cf(cf_vectors, key, schema::encode_vector(vector));
        }

        let count = self.vocab_count()? + new_words;
        batch.put_cf(cf_meta, META_VOCAB_COUNT, schema::encode_count(count));

        self.db
            .write(batch)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        debug!(
            inserted = entries.len(),
            new_words,
            total = count,
            "Wrote vector batch"
        );
        Ok(count)
    }

    /// Look up the vector for a word.
    ///
    /// # Returns
    /// * `Ok(Some(vector))` - the word is cached
    /// * `Ok(None)` - the word is not in the vocabulary
    ///
    /// # Errors
    /// `StorageError::CorruptVector` if the stored bytes do not match the
    /// manifest dimension.
    pub fn get(&self, word: &str) -> StorageResult<Option<Vec<f32>>> {
        let cf = self.get_cf(CF_VECTORS)?;
        match self
            .db
            .get_pinned_cf(cf, word.as_bytes())
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?
        {
            Some(bytes) => Ok(Some(schema::decode_vector(
                word,
                &bytes,
                self.manifest.dimension,
            )?)),
            None => Ok(None),
        }
    }

    /// Whether a word is present in the store.
    pub fn contains(&self, word: &str) -> StorageResult<bool> {
        let cf = self.get_cf(CF_VECTORS)?;
        Ok(self
            .db
            .get_pinned_cf(cf, word.as_bytes())
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?
            .is_some())
    }

    /// Number of distinct words currently stored.
    ///
    /// Reads the persisted counter; a store that has never been written to
    /// reports zero.
    pub fn vocab_count(&self) -> StorageResult<u64> {
        let cf = self.get_cf(CF_META)?;
        match self
            .db
            .get_pinned_cf(cf, META_VOCAB_COUNT)
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?
        {
            Some(bytes) => schema::decode_count(&bytes),
            None => Ok(0),
        }
    }

    /// Remove all vectors and reset the vocabulary counter to zero.
    ///
    /// Used before a rebuild when the completeness check fails, so a
    /// partially-built store never mixes stale and fresh entries.
    pub fn clear(&self) -> StorageResult<()> {
        let cf_vectors = self.get_cf(CF_VECTORS)?;
        let cf_meta = self.get_cf(CF_META)?;

        let mut removed: u64 = 0;
        let mut batch = WriteBatch::default();
        let mut pending = 0usize;

        for item in self.db.iterator_cf(cf_vectors, IteratorMode::Start) {
            let (key, _) = item.map_err(|e| StorageError::ReadFailed(e.to_string()))?;
            batch.delete_cf(cf_vectors, key);
            pending += 1;
            removed += 1;
            if pending == CLEAR_BATCH_SIZE {
                self.db
                    .write(std::mem::take(&mut batch))
                    .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
                pending = 0;
            }
        }

        batch.put_cf(cf_meta, META_VOCAB_COUNT, schema::encode_count(0));
        self.db
            .write(batch)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        info!(removed, path = %self.path, "Cleared vector store");
        Ok(())
    }

    /// Flush all column families to disk.
    pub fn flush(&self) -> StorageResult<()> {
        for cf_name in column_families::ALL {
            let cf = self.get_cf(cf_name)?;
            self.db
                .flush_cf(cf)
                .map_err(|e| StorageError::FlushFailed(e.to_string()))?;
        }
        Ok(())
    }

    /// Check that all column families are accessible.
    pub fn health_check(&self) -> StorageResult<()> {
        for cf_name in column_families::ALL {
            self.get_cf(cf_name)?;
        }
        Ok(())
    }

    /// Get a reference to the underlying RocksDB instance.
    ///
    /// For advanced operations not covered by the high-level API. Writing
    /// through this handle bypasses the vocabulary counter.
    pub fn db(&self) -> &DB {
        &self.db
    }
}
