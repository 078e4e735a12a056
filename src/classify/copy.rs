//! Copy executor.
//! - Ensures the parent bucket directory exists (create-if-missing,
//!   idempotent under concurrent callers).
//! - Copies to a temp file in the destination directory, fsyncs it, then
//!   atomically renames temp -> final so partial byte writes are never
//!   exposed.
//! - Propagates timestamps always, permissions/xattrs when requested.

use std::fs;
use std::path::Path;

use crate::errors::ClassifyError;

use super::atomic::rename_into_place;
use super::helpers::io_error_with_help;
use super::{io_copy, metadata, util};

/// Copy `src` into the already-resolved `final_dest`.
pub fn copy_file(src: &Path, final_dest: &Path, preserve_metadata: bool) -> Result<u64, ClassifyError> {
    let copy_err = |source: std::io::Error| ClassifyError::Copy {
        src: src.to_path_buf(),
        dest: final_dest.to_path_buf(),
        source,
    };

    let dest_dir = final_dest.parent().ok_or_else(|| {
        copy_err(std::io::Error::other("destination has no parent directory"))
    })?;

    fs::create_dir_all(dest_dir)
        .map_err(io_error_with_help("create bucket directory", dest_dir))
        .map_err(copy_err)?;

    // Stat the source once, up front; also catches it vanishing early.
    let src_meta = fs::metadata(src)
        .map_err(io_error_with_help("stat source file", src))
        .map_err(copy_err)?;

    let tmp_path = util::unique_temp_path(dest_dir);
    let bytes = match io_copy::copy_streaming(src, &tmp_path) {
        Ok(b) => b,
        Err(e) => {
            // Best-effort cleanup of the temp file on failure.
            let _ = fs::remove_file(&tmp_path);
            return Err(copy_err(io_error_with_help("copy to temporary file", &tmp_path)(e)));
        }
    };

    if let Err(e) = rename_into_place(&tmp_path, final_dest) {
        let _ = fs::remove_file(&tmp_path);
        return Err(copy_err(std::io::Error::other(format!("{e:#}"))));
    }

    metadata::copy_times(final_dest, &src_meta);
    if preserve_metadata {
        metadata::copy_permissions(final_dest, &src_meta);
        metadata::copy_xattrs(src, final_dest);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn creates_missing_bucket_directory() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        fs::write(&src, b"payload").unwrap();
        let dest = td.path().join("out").join("txt").join("a.txt");

        let bytes = copy_file(&src, &dest, false).unwrap();
        assert_eq!(bytes, 7);
        assert_eq!(fs::read(&dest).unwrap(), b"payload");
    }

    #[test]
    fn no_temp_files_left_behind() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        fs::write(&src, b"x").unwrap();
        let out = td.path().join("out");
        let dest = out.join("a.txt");
        copy_file(&src, &dest, false).unwrap();

        let leftovers: Vec<_> = fs::read_dir(&out)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with(".ext_copy."))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn vanished_source_is_copy_error() {
        let td = tempdir().unwrap();
        let src = td.path().join("never-existed");
        let dest = td.path().join("out").join("f");
        let err = copy_file(&src, &dest, false).unwrap_err();
        assert_eq!(err.code(), "copy_error");
    }

    #[test]
    fn mtime_is_propagated() {
        use filetime::FileTime;
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        fs::write(&src, b"timestamped").unwrap();
        // Backdate the source so propagation is observable.
        let old = FileTime::from_unix_time(1_500_000_000, 0);
        filetime::set_file_times(&src, old, old).unwrap();

        let dest = td.path().join("out").join("a.txt");
        copy_file(&src, &dest, false).unwrap();

        let dest_mtime = FileTime::from_last_modification_time(&fs::metadata(&dest).unwrap());
        assert_eq!(dest_mtime.unix_seconds(), 1_500_000_000);
    }
}
