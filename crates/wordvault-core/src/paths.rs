//! Data-directory resolution and on-disk layout.
//!
//! Everything wordvault writes lives under a single root directory:
//!
//! | Path | Contents |
//! |------|----------|
//! | `<root>/downloads/<family>/` | Raw model files as published upstream |
//! | `<root>/db/<family>/` | One RocksDB store directory per model |
//!
//! The root resolves, in order: the `WORDVAULT_ROOT` environment variable,
//! the platform data directory (`dirs::data_dir()/wordvault`), then
//! `./wordvault-data` as a last resort.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data root.
pub const ROOT_ENV_VAR: &str = "WORDVAULT_ROOT";

/// Directory name used under the platform data directory.
const ROOT_DIR_NAME: &str = "wordvault";

/// Fallback root when no platform data directory is available.
const FALLBACK_ROOT: &str = "./wordvault-data";

/// Resolved data root with helpers for the layout beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRoot {
    root: PathBuf,
}

impl DataRoot {
    /// Resolve the data root from the environment.
    ///
    /// Resolution order: `WORDVAULT_ROOT`, `dirs::data_dir()/wordvault`,
    /// `./wordvault-data`. The directory is not created here; creation
    /// happens lazily when a download or store path is first requested.
    pub fn resolve() -> Self {
        if let Ok(root) = std::env::var(ROOT_ENV_VAR) {
            if !root.is_empty() {
                return Self { root: PathBuf::from(root) };
            }
        }
        let root = dirs::data_dir()
            .map(|d| d.join(ROOT_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_ROOT));
        Self { root }
    }

    /// Use an explicit root directory, bypassing environment resolution.
    pub fn at<P: AsRef<Path>>(path: P) -> Self {
        Self {
            root: path.as_ref().to_path_buf(),
        }
    }

    /// The root directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for a downloaded model file, creating parent directories.
    ///
    /// # Arguments
    /// * `family` - Model family subdirectory (e.g. `"word2vec"`)
    /// * `file_name` - File name as published upstream
    ///
    /// # Errors
    /// Returns the underlying `std::io::Error` if the parent directory
    /// cannot be created.
    pub fn download_path(&self, family: &str, file_name: &str) -> std::io::Result<PathBuf> {
        let dir = self.root.join("downloads").join(family);
        std::fs::create_dir_all(&dir)?;
        Ok(dir.join(file_name))
    }

    /// Path for a model's vector store directory, creating parents.
    ///
    /// The store directory itself is created by the storage layer; only the
    /// containing directory is created here.
    ///
    /// # Errors
    /// Returns the underlying `std::io::Error` if the parent directory
    /// cannot be created.
    pub fn store_path(&self, family: &str, store_name: &str) -> std::io::Result<PathBuf> {
        let dir = self.root.join("db").join(family);
        std::fs::create_dir_all(&dir)?;
        Ok(dir.join(store_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_at_uses_explicit_root() {
        let root = DataRoot::at("/tmp/vault-test");
        assert_eq!(root.root(), Path::new("/tmp/vault-test"));
    }

    #[test]
    fn test_download_path_layout() {
        let tmp = TempDir::new().unwrap();
        let root = DataRoot::at(tmp.path());
        let path = root.download_path("word2vec", "google_news.bin.gz").unwrap();
        assert_eq!(
            path,
            tmp.path()
                .join("downloads")
                .join("word2vec")
                .join("google_news.bin.gz")
        );
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_store_path_layout() {
        let tmp = TempDir::new().unwrap();
        let root = DataRoot::at(tmp.path());
        let path = root.store_path("word2vec", "google_news-300").unwrap();
        assert_eq!(
            path,
            tmp.path().join("db").join("word2vec").join("google_news-300")
        );
        assert!(path.parent().unwrap().is_dir());
        // The store directory itself is left to the storage layer.
        assert!(!path.exists());
    }

    #[test]
    fn test_resolve_falls_back_to_some_root() {
        // Whatever the environment, resolution must produce a non-empty root.
        let root = DataRoot::resolve();
        assert!(!root.root().as_os_str().is_empty());
    }
}
