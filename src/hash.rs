//! Content hashing for equality checks.
//!
//! Files are read start-to-end in fixed 4096-byte blocks and fed into a
//! streaming blake3 hasher, so arbitrarily large files never sit in memory
//! whole. The digest is used purely for byte-equality between files; it is
//! not a security boundary.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::ClassifyError;

/// Block size for streaming reads.
pub const HASH_BLOCK_SIZE: usize = 4096;

/// Opaque fixed-size content digest. Equality only; no ordering semantics.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Lowercase hex rendering, for logs and diagnostics.
    pub fn to_hex(&self) -> String {
        let mut s = String::with_capacity(64);
        for b in self.0 {
            s.push_str(&format!("{b:02x}"));
        }
        s
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short prefix is enough to tell digests apart in logs.
        write!(f, "Digest({}..)", &self.to_hex()[..12])
    }
}

/// Compute the digest of a file's bytes.
///
/// Read failures (permission denied, file vanished mid-read, I/O error) come
/// back as `ClassifyError::Hash` carrying the path; the caller decides
/// whether that is fatal-for-this-file or fatal-for-the-run.
pub fn digest_file(path: &Path) -> Result<Digest, ClassifyError> {
    let mut file = File::open(path).map_err(|source| ClassifyError::Hash {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = blake3::Hasher::new();
    let mut block = [0u8; HASH_BLOCK_SIZE];
    loop {
        let n = file.read(&mut block).map_err(|source| ClassifyError::Hash {
            path: path.to_path_buf(),
            source,
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&block[..n]);
    }

    Ok(Digest(*hasher.finalize().as_bytes()))
}
