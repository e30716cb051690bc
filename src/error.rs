//! Error taxonomy for the scanner.
//!
//! Probe failures carry the repository path and the failing sub-probe so
//! the user can locate the offending repository from the diagnostic
//! alone. Traversal and configuration failures abort the run; probe
//! failures are isolated by the pipeline (logged, counted, skipped).

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The sub-probe that failed while reading a repository's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeStage {
    /// Branch resolution (`symbolic-ref` / `rev-parse --short`)
    Branch,
    /// Remote resolution (`remote -v`)
    Remote,
    /// Working-tree status (`status --porcelain -b`)
    Status,
}

impl fmt::Display for ProbeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProbeStage::Branch => "branch",
            ProbeStage::Remote => "remote",
            ProbeStage::Status => "status",
        };
        f.write_str(name)
    }
}

/// Main error type for scan operations
#[derive(Error, Debug)]
pub enum ScanError {
    /// A filesystem access failure while walking the directory tree.
    #[error("traversal failed: {0}")]
    Traversal(#[from] walkdir::Error),

    /// A git invocation or parse failure for a single repository.
    #[error("cannot read {} ({stage} probe): {detail}", repo.display())]
    Probe {
        repo: PathBuf,
        stage: ProbeStage,
        detail: String,
    },

    /// A malformed output-format template.
    #[error("invalid output format: {message}")]
    Config { message: String },

    /// An I/O failure while emitting results.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Builds a probe error for the given repository and sub-probe.
    pub fn probe(repo: &Path, stage: ProbeStage, detail: impl Into<String>) -> Self {
        ScanError::Probe {
            repo: repo.to_path_buf(),
            stage,
            detail: detail.into(),
        }
    }

    /// Builds a template configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        ScanError::Config {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, ScanError>;
