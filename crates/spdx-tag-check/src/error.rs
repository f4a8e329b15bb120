//! Semantic error types for the checker.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop the checker before or while reading documents.
///
/// Malformed documents are not errors here; they are reported and reflected
/// in the exit status.
#[derive(Debug, Error)]
pub enum CheckError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A document could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The report could not be written.
    #[error("failed to write report: {0}")]
    Write(#[from] io::Error),
}
