//! Directories and non-regular entries never produce destination-side files
//! themselves; only their descendant regular files do.

use std::fs;
use tempfile::tempdir;

use ext_copy::{Config, classify_tree};

#[test]
fn empty_directories_leave_no_trace() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    fs::create_dir_all(src.join("empty/also_empty")).unwrap();
    fs::create_dir_all(&dest).unwrap();

    let stats = classify_tree(&Config::new(&src, &dest)).unwrap();
    assert_eq!(stats.copied, 0);
    assert!(fs::read_dir(&dest).unwrap().next().is_none());
}

#[cfg(unix)]
#[test]
fn symlinks_and_fifos_are_silently_ignored() {
    use std::os::unix::fs::symlink;

    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dest).unwrap();

    fs::write(src.join("real.dat"), b"bytes").unwrap();
    symlink(src.join("real.dat"), src.join("alias.dat")).unwrap();
    // A fifo, if mkfifo is available on this system.
    let fifo = src.join("pipe");
    let c_path = std::ffi::CString::new(fifo.to_string_lossy().as_bytes()).unwrap();
    let rc = unsafe { libc::mkfifo(c_path.as_ptr(), 0o644) };

    let stats = classify_tree(&Config::new(&src, &dest)).unwrap();
    assert_eq!(stats.copied, 1, "only the regular file is copied");
    assert_eq!(stats.errors, 0, "ignored entries are not errors");
    assert!(dest.join("dat/real.dat").is_file());
    assert!(!dest.join("dat/alias.dat").exists());
    if rc == 0 {
        assert!(!dest.join("pipe").exists());
    }
}
