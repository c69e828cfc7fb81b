//! RocksDB-backed persistent storage for word vectors.
//!
//! One [`VectorStore`] owns one RocksDB directory holding the vectors of a
//! single pretrained model. The store exists so that a multi-gigabyte model
//! file is parsed once: after a build completes, every lookup is a RocksDB
//! point read.
//!
//! # Column Families
//! | Name | Key | Value |
//! |------|-----|-------|
//! | `vectors` | word UTF-8 bytes | `4 * dimension` little-endian f32 bytes |
//! | `meta` | `"manifest"` | JSON [`StoreManifest`] |
//! | `meta` | `"vocab_count"` | u64 little-endian distinct-word count |
//!
//! # Writer Discipline
//! The vocabulary counter is maintained in the same `WriteBatch` as the
//! vector puts, which keeps it exact under the store's single-writer
//! contract. Concurrent readers are safe; concurrent writers are not
//! supported.

pub mod column_families;
pub mod config;
pub mod error;
pub mod schema;
pub mod store;

pub use config::StoreConfig;
pub use error::{StorageError, StorageResult};
pub use schema::StoreManifest;
pub use store::VectorStore;
