//! Collision resolution.
//!
//! Policy: walk the candidate chain `dest`, `dest_copy-2`, `dest_copy-3`, …
//! (suffix inserted before the extension). The chain is only walked while a
//! candidate already exists; it ends at the first free slot (`Write`) or at
//! the first existing file whose content digest equals the source's (`Skip`).
//!
//! Notes:
//! - The source digest is computed at most once per call, and only when the
//!   first candidate turns out to exist.
//! - This only decides a path from current filesystem state. Callers must
//!   serialize resolution-and-copy for chains that can collide (see
//!   `walk`: one bucket is processed by one worker at a time).
//! - A pre-existing unrelated `<base>_copy-N<ext>` file is just another
//!   chain element; it gets compared like any other.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::errors::ClassifyError;
use crate::hash::{Digest, digest_file};

/// Safety cap on chain length; beyond this the file is reported instead of
/// looping over a pathologically crowded directory.
pub const MAX_CHAIN_TRIES: u64 = 10_000;

/// Decision for one source file against one desired destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAction {
    /// Identical content already present at this path; nothing to write.
    Skip { existing: PathBuf },
    /// First free slot on the chain; caller copies the file here.
    Write(PathBuf),
}

/// Settle a final destination for `src` starting at `desired`.
///
/// Errors carry `ClassifyError::Hash` when a digest needed for a comparison
/// cannot be computed (the caller must not write in that case) and
/// `ClassifyError::ChainExhausted` past `MAX_CHAIN_TRIES` candidates.
pub fn resolve(src: &Path, desired: &Path) -> Result<ResolvedAction, ClassifyError> {
    let mut src_digest: Option<Digest> = None;
    let mut candidate = desired.to_path_buf();
    let mut n: u64 = 2;

    loop {
        if !candidate.exists() {
            return Ok(ResolvedAction::Write(candidate));
        }

        // Lazily hash the source the first time a comparison is needed.
        let src_d = match src_digest {
            Some(d) => d,
            None => {
                let d = digest_file(src)?;
                src_digest = Some(d);
                d
            }
        };

        let existing_d = digest_file(&candidate)?;
        if existing_d == src_d {
            trace!(src = %src.display(), existing = %candidate.display(), "identical content already present");
            return Ok(ResolvedAction::Skip { existing: candidate });
        }

        if n > MAX_CHAIN_TRIES {
            return Err(ClassifyError::ChainExhausted {
                path: desired.to_path_buf(),
            });
        }
        candidate = chain_candidate(desired, n);
        n += 1;
    }
}

/// N-th chain element: `<stem>_copy-<n><.ext?>` next to `desired`.
/// Preserves non-UTF8 stems and extensions via OsString.
fn chain_candidate(desired: &Path, n: u64) -> PathBuf {
    let stem: OsString = desired
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsStr::new("file").to_os_string());
    let ext: Option<OsString> = desired.extension().map(|e| e.to_os_string());

    let mut name = OsString::new();
    name.push(&stem);
    name.push(format!("_copy-{n}"));
    if let Some(e) = ext {
        name.push(".");
        name.push(e);
    }
    desired.with_file_name(name)
}
