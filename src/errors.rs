//! Typed error definitions for ext_copy.
//! Provides a small set of well-known failure modes for better logs and tests.
//!
//! Only `SourceNotFound` aborts a run; everything else is scoped to one
//! subtree or one file and the traversal continues past it.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Failed to enumerate '{path}': {source}")]
    Enumerate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to hash '{path}': {source}")]
    Hash {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to copy '{src}' -> '{dest}': {source}")]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Collision chain exhausted for '{path}'")]
    ChainExhausted { path: PathBuf },
}

impl ClassifyError {
    /// Stable machine-readable tag for structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            ClassifyError::SourceNotFound(_) => "source_not_found",
            ClassifyError::Enumerate { .. } => "enumerate_error",
            ClassifyError::Hash { .. } => "hash_error",
            ClassifyError::Copy { .. } => "copy_error",
            ClassifyError::ChainExhausted { .. } => "chain_exhausted",
        }
    }
}
