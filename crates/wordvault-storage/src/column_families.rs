//! RocksDB column family definitions for the vector store.
//!
//! # Column Families (2 total)
//! | Name | Purpose | Key Format | Value |
//! |------|---------|------------|-------|
//! | `vectors` | word → embedding | word UTF-8 bytes | little-endian f32 bytes |
//! | `meta` | store bookkeeping | fixed string keys | JSON manifest / u64 counter |
//!
//! Option builders are infallible at construction time; errors surface at
//! DB open, where RocksDB reports them itself.

use rocksdb::{BlockBasedOptions, Cache, ColumnFamilyDescriptor, Options};

/// Word → vector payload storage.
/// Key: word UTF-8 bytes. Value: `4 * dimension` little-endian f32 bytes.
pub const CF_VECTORS: &str = "vectors";

/// Store metadata.
/// Keys: `"manifest"` (JSON `StoreManifest`), `"vocab_count"` (u64 LE).
pub const CF_META: &str = "meta";

/// All column family names.
pub const ALL: &[&str] = &[CF_VECTORS, CF_META];

/// Options for the vectors CF: bloom-filtered point lookups over many
/// fixed-size values, LZ4 to claw back some of the float payload.
fn vectors_cf_options(cache: &Cache) -> Options {
    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);
    block_opts.set_bloom_filter(10.0, false);
    block_opts.set_cache_index_and_filter_blocks(true);

    let mut opts = Options::default();
    opts.set_block_based_table_factory(&block_opts);
    opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
    opts.create_if_missing(true);
    opts
}

/// Options for the meta CF: a handful of tiny keys, no compression.
fn meta_cf_options(cache: &Cache) -> Options {
    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);

    let mut opts = Options::default();
    opts.set_block_based_table_factory(&block_opts);
    opts.set_compression_type(rocksdb::DBCompressionType::None);
    opts.create_if_missing(true);
    opts
}

/// Descriptors for all column families, sharing one block cache.
pub fn descriptors(cache: &Cache) -> Vec<ColumnFamilyDescriptor> {
    vec![
        ColumnFamilyDescriptor::new(CF_VECTORS, vectors_cf_options(cache)),
        ColumnFamilyDescriptor::new(CF_META, meta_cf_options(cache)),
    ]
}
