//! `models` command: list registry entries.

use wordvault_embeddings::registry::PRETRAINED_MODELS;

use crate::CliExitCode;

pub fn run() -> CliExitCode {
    println!("Available pretrained models:");
    println!();
    println!("  {:<16} {:>5} {:>12}  {}", "NAME", "DIM", "VOCAB", "DESCRIPTION");
    for model in PRETRAINED_MODELS {
        println!(
            "  {:<16} {:>5} {:>12}  {}",
            model.name, model.dimension, model.vocab_size, model.description
        );
    }
    println!();
    println!("Fetch one with: wordvault fetch <name>");
    CliExitCode::Success
}
