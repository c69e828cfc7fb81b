//! CLI exit code handling.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Recoverable error (network, configuration, I/O)
//! - 2: Corruption (malformed model file, store manifest mismatch,
//!   malformed stored vectors)
//!
//! Corruption gets its own code so scripts can distinguish "retry later"
//! from "delete the cache and start over".

use wordvault_embeddings::EmbeddingError;

/// Exit codes for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    /// Command completed.
    Success = 0,
    /// Recoverable failure.
    Error = 1,
    /// Corrupt data on disk or in the model file.
    Corruption = 2,
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}

impl From<&EmbeddingError> for CliExitCode {
    fn from(err: &EmbeddingError) -> Self {
        if err.is_corruption() {
            CliExitCode::Corruption
        } else {
            CliExitCode::Error
        }
    }
}

/// Print an error to stderr and map it to an exit code.
pub fn report(err: &EmbeddingError) -> CliExitCode {
    eprintln!("Error: {err}");
    CliExitCode::from(err)
}
