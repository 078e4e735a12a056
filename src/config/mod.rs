//! Configuration: types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::validate_and_normalize;
pub use xml::{create_template_config, load_config_from_xml_path};

use anyhow::Result;
use std::path::PathBuf;

/// Outcome of the first-run config check.
pub enum LoadResult {
    /// No config existed; a template was written at this path.
    CreatedTemplate(PathBuf),
    /// A config exists (or none is wanted); proceed normally.
    Ready,
}

/// Create a template config on first run (default path only, never when
/// `EXT_COPY_CONFIG` points somewhere explicit).
pub fn load_or_init() -> Result<LoadResult> {
    match xml::ensure_default_config_exists() {
        Some(path) => Ok(LoadResult::CreatedTemplate(path)),
        None => Ok(LoadResult::Ready),
    }
}
