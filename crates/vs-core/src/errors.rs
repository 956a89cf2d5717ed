//! Cross-cutting error types for vars-summary.
//!
//! Domain-specific errors (`DatabaseError`, `PhylogenyError`, `ConfigError`)
//! live in their respective crates and converge into `anyhow` in `vs-cli`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can be raised by any vars-summary crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The concept list does not exist.
    #[error("{} does not exist. Check options.", path.display())]
    MissingInput { path: PathBuf },

    /// Reading an input file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
