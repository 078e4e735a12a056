//! Metadata propagation through the copy executor: timestamps always,
//! permissions only with preserve_metadata.

use filetime::FileTime;
use std::fs;
use tempfile::tempdir;

use ext_copy::classify::copy_file;

#[test]
fn mtime_is_always_copied() {
    let td = tempdir().unwrap();
    let src = td.path().join("old.txt");
    fs::write(&src, b"dated content").unwrap();
    let stamp = FileTime::from_unix_time(1_400_000_000, 0);
    filetime::set_file_times(&src, stamp, stamp).unwrap();

    let dest = td.path().join("out/txt/old.txt");
    copy_file(&src, &dest, false).unwrap();

    let meta = fs::metadata(&dest).unwrap();
    assert_eq!(
        FileTime::from_last_modification_time(&meta).unix_seconds(),
        1_400_000_000
    );
}

#[cfg(unix)]
#[test]
fn permissions_follow_only_when_requested() {
    use std::os::unix::fs::PermissionsExt;

    let td = tempdir().unwrap();
    let src = td.path().join("exec.sh");
    fs::write(&src, b"#!/bin/sh\n").unwrap();
    fs::set_permissions(&src, fs::Permissions::from_mode(0o750)).unwrap();

    let plain = td.path().join("out/sh/plain.sh");
    copy_file(&src, &plain, false).unwrap();
    let plain_mode = fs::metadata(&plain).unwrap().permissions().mode() & 0o777;
    assert_ne!(plain_mode, 0o750, "mode not copied without the flag");

    let preserved = td.path().join("out/sh/preserved.sh");
    copy_file(&src, &preserved, true).unwrap();
    let kept_mode = fs::metadata(&preserved).unwrap().permissions().mode() & 0o777;
    assert_eq!(kept_mode, 0o750);
}
