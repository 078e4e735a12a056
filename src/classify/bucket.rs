//! Extension-token derivation and bucket directory mapping.
//!
//! The token is the text after the last '.' in the file name, case-preserved.
//! Dotfiles (`.env`) and trailing-dot names (`foo.`) carry no token; those
//! files route to the destination root itself rather than a subdirectory.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Extension token of a file name, or None for extensionless names.
/// Preserves non-UTF8 names and case.
pub fn extension_token(name: &OsStr) -> Option<OsString> {
    Path::new(name)
        .extension()
        .filter(|e| !e.is_empty())
        .map(|e| e.to_os_string())
}

/// Destination directory for a given token. The empty-token bucket is the
/// destination root itself, not a subdirectory.
pub fn bucket_dir(dest_root: &Path, token: Option<&OsStr>) -> PathBuf {
    match token {
        Some(t) => dest_root.join(t),
        None => dest_root.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_extension() {
        assert_eq!(extension_token(OsStr::new("report.txt")), Some("txt".into()));
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(extension_token(OsStr::new("photo.JPG")), Some("JPG".into()));
    }

    #[test]
    fn last_dot_wins() {
        assert_eq!(
            extension_token(OsStr::new("archive.tar.gz")),
            Some("gz".into())
        );
    }

    #[test]
    fn no_dot_means_no_token() {
        assert_eq!(extension_token(OsStr::new("Makefile")), None);
    }

    #[test]
    fn dotfile_is_extensionless() {
        assert_eq!(extension_token(OsStr::new(".env")), None);
    }

    #[test]
    fn trailing_dot_is_extensionless() {
        assert_eq!(extension_token(OsStr::new("notes.")), None);
    }

    #[test]
    fn empty_token_routes_to_root() {
        let root = Path::new("/dest");
        assert_eq!(bucket_dir(root, None), PathBuf::from("/dest"));
        assert_eq!(
            bucket_dir(root, Some(OsStr::new("txt"))),
            PathBuf::from("/dest/txt")
        );
    }
}
