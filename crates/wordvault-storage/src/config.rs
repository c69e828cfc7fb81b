//! Store configuration.

use serde::{Deserialize, Serialize};

fn default_block_cache_size() -> usize {
    64 * 1024 * 1024 // 64 MiB
}

fn default_max_open_files() -> i32 {
    512
}

fn default_create_if_missing() -> bool {
    true
}

fn default_enable_wal() -> bool {
    true
}

/// Tuning options for the RocksDB store.
///
/// The defaults suit the expected workload: one large sequential build
/// followed by point lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Shared block cache size in bytes.
    #[serde(default = "default_block_cache_size")]
    pub block_cache_size: usize,

    /// Maximum number of open SST files. -1 means unlimited.
    #[serde(default = "default_max_open_files")]
    pub max_open_files: i32,

    /// Create the database directory if it does not exist.
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,

    /// Whether to flush the write-ahead log automatically.
    #[serde(default = "default_enable_wal")]
    pub enable_wal: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            block_cache_size: default_block_cache_size(),
            max_open_files: default_max_open_files(),
            create_if_missing: default_create_if_missing(),
            enable_wal: default_enable_wal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.block_cache_size, 64 * 1024 * 1024);
        assert_eq!(config.max_open_files, 512);
        assert!(config.create_if_missing);
        assert!(config.enable_wal);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.block_cache_size, 64 * 1024 * 1024);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = StoreConfig {
            block_cache_size: 1024,
            max_open_files: 16,
            create_if_missing: false,
            enable_wal: false,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: StoreConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.block_cache_size, 1024);
        assert_eq!(back.max_open_files, 16);
        assert!(!back.create_if_missing);
        assert!(!back.enable_wal);
    }
}
