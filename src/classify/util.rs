use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub(super) fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let tmp_name = format!(".ext_copy.{}.{}.tmp", pid, nanos);
    let mut p = dst_dir.to_path_buf();
    p.push(tmp_name);
    p
}

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = File::open(dir)?;
    f.sync_all()
}

#[cfg(windows)]
pub(super) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
