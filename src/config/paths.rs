//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors
//! for safety.

use anyhow::{Context, Result, anyhow};
use dirs::{config_dir, data_dir};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// OS-appropriate default config path (`<config dir>/ext_copy/config.xml`).
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(mut base) = config_dir() {
        base.push("ext_copy");
        base.push("config.xml");
        return Ok(base);
    }
    let home = std::env::var("HOME").context("neither a config dir nor HOME is available")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("ext_copy")
        .join("config.xml"))
}

/// OS-appropriate default log file path (data dir).
pub fn default_log_path() -> Result<PathBuf> {
    if let Some(mut base) = data_dir() {
        base.push("ext_copy");
        // ensure dir exists (best-effort)
        let _ = fs::create_dir_all(&base);
        base.push("ext_copy.log");
        return Ok(base);
    }
    let home = std::env::var("HOME")
        .map_err(|_| anyhow!("neither a data dir nor HOME is available"))?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("ext_copy")
        .join("ext_copy.log"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
