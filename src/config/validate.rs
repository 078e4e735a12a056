//! Config validation logic.
//! Verifies the source exists and is readable, creates the destination root,
//! probes writability, and keeps the two roots disjoint.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::ClassifyError;

use super::types::Config;

/// Validate roots, create the destination if missing, and canonicalize both.
/// Only the extension buckets are created lazily later, during traversal.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<()> {
    let src = cfg
        .source_root
        .clone()
        .context("no source directory configured")?;
    let dest = cfg
        .dest_root
        .clone()
        .context("no destination directory configured")?;

    // 1) Source: must exist, be a directory, and be readable.
    if !src.exists() {
        return Err(ClassifyError::SourceNotFound(src).into());
    }
    if !src.is_dir() {
        bail!("source is not a directory: {}", src.display());
    }
    fs::read_dir(&src).with_context(|| {
        format!("cannot read source directory '{}'; check permissions", src.display())
    })?;
    debug!("source readable: {}", src.display());

    // 2) Destination: must be a directory; create if missing; ensure writable.
    if dest.exists() {
        if !dest.is_dir() {
            bail!("destination exists but isn't a directory: {}", dest.display());
        }
    } else {
        fs::create_dir_all(&dest).with_context(|| {
            format!("failed to create destination directory '{}'", dest.display())
        })?;
        info!("Created destination directory: {}", dest.display());
    }
    writable_probe(&dest).with_context(|| {
        format!("cannot write to destination '{}'; check permissions", dest.display())
    })?;
    debug!("destination writable: {}", dest.display());

    // 3) Resolve symlinks and ensure the roots are disjoint (neither contains
    //    the other); classifying a tree into itself would re-discover its own
    //    output.
    let src_real = fs::canonicalize(&src).unwrap_or_else(|_| src.clone());
    let dest_real = fs::canonicalize(&dest).unwrap_or_else(|_| dest.clone());

    if src_real == dest_real {
        bail!(
            "source and destination resolve to the same path: '{}'",
            src_real.display()
        );
    }
    if dest_real.starts_with(&src_real) {
        bail!(
            "destination '{}' must not be inside source '{}'",
            dest_real.display(),
            src_real.display()
        );
    }
    if src_real.starts_with(&dest_real) {
        bail!(
            "source '{}' must not be inside destination '{}'",
            src_real.display(),
            dest_real.display()
        );
    }

    cfg.source_root = Some(src_real);
    cfg.dest_root = Some(dest_real);

    info!(
        "Config validated: source='{}' dest='{}' log_file='{}'",
        src.display(),
        dest.display(),
        cfg.log_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".into())
    );
    Ok(())
}

/// Quick writable probe: create and remove a small file in `dir`.
/// Uses create_new to avoid clobbering existing files.
fn writable_probe(dir: &Path) -> std::io::Result<()> {
    let probe = dir.join(format!(".ext_copy_probe_{}.tmp", std::process::id()));
    match fs::OpenOptions::new().create_new(true).write(true).open(&probe) {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            Ok(())
        }
        Err(e) => Err(e),
    }
}
