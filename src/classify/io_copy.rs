//! Streaming byte copy.
//!
//! - Writes to a newly created destination file (`create_new`; never
//!   clobbers).
//! - Buffered I/O with large (1 MiB) buffers to reduce syscall count.
//! - Fsyncs the destination file before returning so a later rename only
//!   ever exposes fully-written bytes.
//!
//! Snapshot semantics: the source is read once from start to EOF; bytes
//! appended concurrently are not included, truncation surfaces as early EOF
//! or a read error.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

const BUF_SIZE: usize = 1024 * 1024;

/// Copy `src` -> `dst`, returning the number of bytes written.
/// Callers are responsible for syncing the parent directory after the final
/// rename.
pub(super) fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;

    let mut opts = OpenOptions::new();
    opts.write(true).create_new(true);
    let dst_f = opts.open(dst)?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let mut block = vec![0u8; BUF_SIZE];
    let mut bytes: u64 = 0;
    loop {
        let n = reader.read(&mut block)?;
        if n == 0 {
            break;
        }
        writer.write_all(&block[..n])?;
        bytes += n as u64;
    }
    writer.flush()?;
    writer.get_ref().sync_all()?;

    Ok(bytes)
}
