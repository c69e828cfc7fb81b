//! `lookup` command: print vectors with per-word timing.

use std::path::PathBuf;
use std::time::Instant;

use wordvault_embeddings::{Word2VecEmbedding, DEFAULT_BATCH_SIZE};

use crate::error::report;
use crate::CliExitCode;

use super::embedding_options;

/// Components printed before truncating, without `--full`.
const PREVIEW_COMPONENTS: usize = 8;

pub fn run(name: &str, root: Option<PathBuf>, words: &[String], full: bool) -> CliExitCode {
    let options = embedding_options(root, false, DEFAULT_BATCH_SIZE);
    let emb = match Word2VecEmbedding::open(name, options) {
        Ok(emb) => emb,
        Err(err) => return report(&err),
    };

    match emb.is_complete() {
        Ok(false) => {
            eprintln!(
                "Warning: cache for '{name}' is incomplete; run `wordvault fetch {name}` first"
            );
        }
        Ok(true) => {}
        Err(err) => return report(&err),
    }

    for word in words {
        let start = Instant::now();
        match emb.lookup(word) {
            Ok(Some(vector)) => {
                let elapsed = start.elapsed();
                println!("{word}  [{}d]  ({:.3}ms)", vector.len(), elapsed.as_secs_f64() * 1e3);
                println!("  {}", format_vector(&vector, full));
            }
            Ok(None) => {
                println!("{word}  not in vocabulary");
            }
            Err(err) => return report(&err),
        }
    }
    CliExitCode::Success
}

fn format_vector(vector: &[f32], full: bool) -> String {
    let shown = if full {
        vector.len()
    } else {
        vector.len().min(PREVIEW_COMPONENTS)
    };
    let mut out = vector[..shown]
        .iter()
        .map(|v| format!("{v:.4}"))
        .collect::<Vec<_>>()
        .join(" ");
    if shown < vector.len() {
        out.push_str(&format!(" ... (+{} more)", vector.len() - shown));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vector_preview() {
        let vector: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let out = format_vector(&vector, false);
        assert!(out.starts_with("0.0000 1.0000"));
        assert!(out.ends_with("(+4 more)"));
    }

    #[test]
    fn test_format_vector_full() {
        let vector: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let out = format_vector(&vector, true);
        assert!(out.contains("11.0000"));
        assert!(!out.contains("more"));
    }

    #[test]
    fn test_format_vector_short() {
        let out = format_vector(&[1.0, 2.0], false);
        assert_eq!(out, "1.0000 2.0000");
    }
}
