//! Metadata propagation.
//! - Timestamps (atime, mtime) are always copied, best-effort: a file that
//!   copied correctly is not failed over a clock attribute.
//! - Permissions (Unix mode / Windows readonly) only when requested.
//! - Xattrs behind the `xattrs` feature, also only when requested.

use filetime::{FileTime, set_file_times};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

/// Copy timestamps from already-fetched `src_meta` onto `dest`.
/// Callers pass src metadata to avoid re-statting the source repeatedly.
pub(super) fn copy_times(dest: &Path, src_meta: &fs::Metadata) {
    #[cfg(unix)]
    let (at, mt) = {
        use std::os::unix::fs::MetadataExt;
        (
            FileTime::from_unix_time(src_meta.atime(), src_meta.atime_nsec() as u32),
            FileTime::from_unix_time(src_meta.mtime(), src_meta.mtime_nsec() as u32),
        )
    };
    #[cfg(not(unix))]
    let (at, mt) = {
        let mt = src_meta
            .modified()
            .map(FileTime::from_system_time)
            .unwrap_or_else(|_| FileTime::now());
        let at = src_meta
            .accessed()
            .map(FileTime::from_system_time)
            .unwrap_or(mt);
        (at, mt)
    };

    if let Err(e) = set_file_times(dest, at, mt) {
        warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination");
    } else {
        trace!(path = %dest.display(), "set atime/mtime on destination");
    }
}

/// Copy permission bits (Unix mode, Windows readonly attribute) onto `dest`.
pub(super) fn copy_permissions(dest: &Path, src_meta: &fs::Metadata) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let src_mode = src_meta.permissions().mode() & 0o777;
        let perms = fs::Permissions::from_mode(src_mode);
        if let Err(e) = fs::set_permissions(dest, perms) {
            warn!(path = %dest.display(), mode = format!("{:o}", src_mode), error = %e, "failed to set permissions on destination");
        } else {
            trace!(path = %dest.display(), mode = format!("{:o}", src_mode), "set permissions on destination");
        }
    }
    #[cfg(windows)]
    {
        let ro = src_meta.permissions().readonly();
        match fs::metadata(dest) {
            Ok(meta) => {
                let mut perms = meta.permissions();
                perms.set_readonly(ro);
                if let Err(e) = fs::set_permissions(dest, perms) {
                    warn!(path = %dest.display(), readonly = ro, error = %e, "failed to set readonly attribute on destination");
                }
            }
            Err(e) => {
                warn!(path = %dest.display(), error = %e, "failed to stat destination for readonly preservation");
            }
        }
    }
}

/// Copy extended attributes from `src` to `dest` (best-effort, feature-gated).
pub(super) fn copy_xattrs(src: &Path, dest: &Path) {
    #[cfg(feature = "xattrs")]
    {
        match xattr::list(src) {
            Ok(names) => {
                for name in names {
                    match xattr::get(src, &name) {
                        Ok(Some(value)) => {
                            if let Err(e) = xattr::set(dest, &name, &value) {
                                warn!(src = %src.display(), dest = %dest.display(), xattr = %name.to_string_lossy(), error = %e, "failed to set xattr on destination");
                            }
                        }
                        Ok(None) => {
                            let _ = xattr::set(dest, &name, &[]);
                        }
                        Err(e) => {
                            warn!(src = %src.display(), xattr = %name.to_string_lossy(), error = %e, "failed to read xattr value from source");
                        }
                    }
                }
            }
            Err(e) => {
                warn!(src = %src.display(), error = %e, "failed to list xattrs; continuing");
            }
        }
    }
    #[cfg(not(feature = "xattrs"))]
    {
        let _ = (src, dest);
    }
}
