//! wordvault CLI.
//!
//! Local cache for pretrained word embeddings: download a published model
//! once, parse it once, answer lookups from RocksDB afterwards.
//!
//! # Commands
//!
//! - `models`: list the pretrained models the registry knows
//! - `fetch <name>`: download the model if missing and build its cache
//! - `lookup <name> <words...>`: print vectors with per-word timing
//! - `status <name>`: cache completeness and paths

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use wordvault_embeddings::DEFAULT_BATCH_SIZE;

mod commands;
mod error;

pub use error::CliExitCode;

/// Local cache for pretrained word embeddings.
#[derive(Parser)]
#[command(name = "wordvault")]
#[command(version)]
#[command(about = "Download, cache, and look up pretrained word embeddings")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Data root directory (defaults to WORDVAULT_ROOT or the platform
    /// data directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the pretrained models the registry knows
    Models,
    /// Download a model if missing and build its vector cache
    Fetch {
        /// Registry name of the model (see `models`)
        name: String,
        /// Clear the cache first and rebuild even if complete
        #[arg(long)]
        force: bool,
        /// Word/vector pairs per storage batch
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,
        /// Disable progress bars
        #[arg(long)]
        no_progress: bool,
    },
    /// Look up vectors for one or more words
    Lookup {
        /// Registry name of the model
        name: String,
        /// Words to look up
        #[arg(required = true)]
        words: Vec<String>,
        /// Print every vector component instead of a preview
        #[arg(long)]
        full: bool,
    },
    /// Show cache completeness and paths for a model
    Status {
        /// Registry name of the model
        name: String,
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match cli.command {
        Commands::Models => commands::models::run(),
        Commands::Fetch {
            name,
            force,
            batch_size,
            no_progress,
        } => commands::fetch::run(&name, cli.root, force, batch_size, no_progress).await,
        Commands::Lookup { name, words, full } => {
            commands::lookup::run(&name, cli.root, &words, full)
        }
        Commands::Status { name, json } => commands::status::run(&name, cli.root, json),
    };

    std::process::exit(exit_code.into());
}
