//! `status` command: cache completeness and paths.

use std::path::PathBuf;

use serde_json::json;

use wordvault_embeddings::{Word2VecEmbedding, DEFAULT_BATCH_SIZE};

use crate::error::report;
use crate::CliExitCode;

use super::embedding_options;

pub fn run(name: &str, root: Option<PathBuf>, as_json: bool) -> CliExitCode {
    let options = embedding_options(root, false, DEFAULT_BATCH_SIZE);
    let emb = match Word2VecEmbedding::open(name, options) {
        Ok(emb) => emb,
        Err(err) => return report(&err),
    };

    let count = match emb.vocab_count() {
        Ok(count) => count,
        Err(err) => return report(&err),
    };
    let model = emb.model();
    let complete = count >= model.vocab_size;

    if as_json {
        let status = json!({
            "model": model.name,
            "dimension": model.dimension,
            "vocab_size": model.vocab_size,
            "cached_words": count,
            "complete": complete,
            "store_path": emb.store_path(),
            "source_url": model.url,
        });
        println!("{}", serde_json::to_string_pretty(&status).unwrap_or_default());
    } else {
        println!("Model:        {} ({})", model.name, model.description);
        println!("Dimension:    {}", model.dimension);
        println!("Cached words: {count} / {}", model.vocab_size);
        println!("Complete:     {}", if complete { "yes" } else { "no" });
        println!("Store:        {}", emb.store_path());
        if !complete {
            println!();
            println!("Run `wordvault fetch {name}` to build the cache.");
        }
    }
    CliExitCode::Success
}
