//! Subcommand handlers.
//!
//! Each handler returns a [`crate::CliExitCode`] instead of panicking or
//! bubbling errors into `main`, so exit-code mapping lives in one place.

pub mod fetch;
pub mod lookup;
pub mod models;
pub mod status;

use std::path::PathBuf;

use wordvault_embeddings::EmbeddingOptions;

/// Options shared by every command that opens a cache.
pub(crate) fn embedding_options(
    root: Option<PathBuf>,
    show_progress: bool,
    batch_size: usize,
) -> EmbeddingOptions {
    EmbeddingOptions {
        root,
        show_progress,
        batch_size,
    }
}
