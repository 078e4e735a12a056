//! I/O helper utilities.
//!
//! Small adapters that enrich io::Error with actionable context/hints,
//! usable with map_err in io::Result code paths.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create dir", dir))?;

use std::io;
use std::path::Path;

#[cfg(unix)]
use libc;

/// Format a human-friendly message with op/path plus platform-aware hints.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" — permission denied; check ownership and write permissions.");
                }
                libc::ENOENT => {
                    msg.push_str(" — path not found; verify it exists.");
                }
                libc::EEXIST => {
                    msg.push_str(" — already exists; pick a unique name or remove the target.");
                }
                libc::ENOSPC => {
                    msg.push_str(" — insufficient space on device.");
                }
                libc::EROFS => {
                    msg.push_str(" — read-only filesystem; cannot write here.");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" — filename or path too long; shorten path segments.");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" — access denied; check permissions."), // ERROR_ACCESS_DENIED
                2 | 3 => msg.push_str(" — path not found; verify it exists."), // FILE/PATH NOT FOUND
                80 => msg.push_str(" — already exists; pick a unique name."), // ERROR_FILE_EXISTS
                112 => msg.push_str(" — insufficient disk space."),        // ERROR_DISK_FULL
                206 => msg.push_str(" — filename or path too long (MAX_PATH exceeded)."), // ERROR_FILENAME_EXCED_RANGE
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" — permission denied; check ownership and write permissions.");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" — path not found; verify it exists.");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str(" — already exists; remove or choose a unique name.");
            }
            _ => {}
        }
    }

    msg
}

/// Adapter for io::Result code paths: converts io::Error -> io::Error with an
/// enriched message while preserving the original ErrorKind.
pub(super) fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}
