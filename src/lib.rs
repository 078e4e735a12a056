//! Core library for `ext_copy`.
//!
//! Copies a source tree into a destination tree re-bucketed by file
//! extension. Name collisions are settled by content hashing: identical
//! bytes are skipped, distinct same-named files get a `_copy-N` suffix.
//!
//! Keep the library small and ergonomic: a Config type with sensible
//! defaults, a validation step, and pure-ish functions that classify and
//! copy.

pub mod app;
pub mod classify;
pub mod cli;
pub mod config;
pub mod errors;
pub mod hash;
pub mod logging;
pub mod output;
pub mod shutdown;

pub use classify::{ClassifyStats, ResolvedAction, classify_tree, resolve};
pub use config::{Config, LogLevel};
pub use errors::ClassifyError;
pub use hash::{Digest, digest_file};
