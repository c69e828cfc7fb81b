//! `fetch` command: download a model if missing and build its cache.

use std::path::PathBuf;

use wordvault_embeddings::Word2VecEmbedding;

use crate::error::report;
use crate::CliExitCode;

use super::embedding_options;

pub async fn run(
    name: &str,
    root: Option<PathBuf>,
    force: bool,
    batch_size: usize,
    no_progress: bool,
) -> CliExitCode {
    let options = embedding_options(root, !no_progress, batch_size);
    let emb = match Word2VecEmbedding::open(name, options) {
        Ok(emb) => emb,
        Err(err) => return report(&err),
    };

    if force {
        if let Err(err) = emb.clear() {
            return report(&err);
        }
    }

    match emb.ensure().await {
        Ok(result) if result.skipped => {
            println!(
                "Cache for '{}' already complete ({} words) at {}",
                name,
                result.total,
                emb.store_path()
            );
            CliExitCode::Success
        }
        Ok(result) => {
            println!(
                "Built cache for '{}': {} words in {:.1}s at {}",
                name,
                result.total,
                result.elapsed.as_secs_f64(),
                emb.store_path()
            );
            CliExitCode::Success
        }
        Err(err) => report(&err),
    }
}
