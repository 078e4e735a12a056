//! Atomic rename helper.
//! - Performs a rename with context-rich errors.
//! - On Windows, removes an existing destination first (RenameFile doesn't
//!   overwrite); the resolver only ever hands us freshly-claimed slots, so
//!   the only thing that can be there is a stale temp of our own.
//! - On Unix, best-effort fsync of the destination directory after rename.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub(super) fn rename_into_place(src: &Path, dst: &Path) -> Result<()> {
    #[cfg(windows)]
    {
        if dst.exists() {
            if let Err(e) = fs::remove_file(dst) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    return Err(e).with_context(|| {
                        format!("remove existing destination before rename: {}", dst.display())
                    });
                }
            }
        }
    }

    fs::rename(src, dst)
        .with_context(|| format!("atomic rename '{}' -> '{}'", src.display(), dst.display()))?;

    // Unix: fsync the destination directory to persist the rename (best-effort).
    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // Ignore fsync errors to avoid turning a successful rename into a failure.
        let _ = super::util::fsync_dir(parent);
    }

    Ok(())
}
