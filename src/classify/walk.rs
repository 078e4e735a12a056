//! Tree classifier.
//!
//! Enumerates the source tree (walkdir, symlinks not followed), derives each
//! file's bucket from its extension token, and drives the collision resolver
//! and copy executor. The source's internal directory hierarchy is
//! intentionally discarded; files are re-bucketed purely by extension.
//!
//! Failure isolation: an unreadable subtree is reported and counted, and the
//! walk continues with its siblings. Per-file errors (hash, copy, exhausted
//! chain) likewise never abort the run.
//!
//! Concurrency: buckets are independent collision domains (same-named files
//! always share a bucket), so buckets fan out across the rayon pool while
//! files within one bucket are processed strictly in order. That keeps the
//! resolver's read-decide-write sequence serialized per destination chain
//! without any locking.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, error, info};
use walkdir::WalkDir;

use crate::config::Config;
use crate::errors::ClassifyError;
use crate::shutdown;

use super::bucket::{bucket_dir, extension_token};
use super::copy::copy_file;
use super::resolve::{ResolvedAction, resolve};

/// Aggregated per-run outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyStats {
    /// Files written to the destination (or would-be writes under dry-run).
    pub copied: u64,
    /// Files recognized as already-present duplicates.
    pub skipped: u64,
    /// Files or subtrees that failed and were passed over.
    pub errors: u64,
    /// Total bytes written.
    pub bytes: u64,
}

impl ClassifyStats {
    fn absorb(&mut self, other: ClassifyStats) {
        self.copied += other.copied;
        self.skipped += other.skipped;
        self.errors += other.errors;
        self.bytes += other.bytes;
    }
}

/// Walk `source_root` and classify every regular file into `dest_root`.
/// Requires a validated config (roots present; see `config::validate`).
pub fn classify_tree(cfg: &Config) -> Result<ClassifyStats> {
    let source = cfg.source_root.as_deref().context("source root not set")?;
    let dest = cfg.dest_root.as_deref().context("destination root not set")?;

    let mut stats = ClassifyStats::default();

    // Pass 1: enumerate files and group them by bucket directory. Anything
    // that is neither a directory nor a regular file is silently ignored.
    let mut buckets: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for entry in WalkDir::new(source).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| source.to_path_buf());
                let err = ClassifyError::Enumerate {
                    path: path.clone(),
                    source: e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("walk error")),
                };
                error!(code = err.code(), path = %path.display(), error = %err, "subtree enumeration failed; continuing with siblings");
                stats.errors += 1;
                continue;
            }
        };

        let ftype = entry.file_type();
        if ftype.is_dir() {
            continue;
        }
        if !ftype.is_file() {
            debug!(path = %entry.path().display(), "ignoring non-regular entry");
            continue;
        }

        let token = extension_token(entry.file_name());
        let bucket = bucket_dir(dest, token.as_deref());
        buckets.entry(bucket).or_default().push(entry.into_path());
    }

    // Deterministic chain numbering within a bucket.
    for files in buckets.values_mut() {
        files.sort();
    }

    // Pass 2: buckets in parallel, files within a bucket sequentially.
    let merged = buckets
        .into_par_iter()
        .map(|(bucket, files)| process_bucket(cfg, bucket, files))
        .reduce(ClassifyStats::default, |mut acc, s| {
            acc.absorb(s);
            acc
        });
    stats.absorb(merged);

    Ok(stats)
}

fn process_bucket(cfg: &Config, bucket: PathBuf, files: Vec<PathBuf>) -> ClassifyStats {
    let mut stats = ClassifyStats::default();

    for src in files {
        if shutdown::is_requested() {
            debug!("shutdown requested; leaving remaining files in place");
            break;
        }

        // Traversal guarantees a file name is present.
        let Some(name) = src.file_name() else {
            continue;
        };
        let desired = bucket.join(name);

        match resolve(&src, &desired) {
            Ok(ResolvedAction::Skip { existing }) => {
                info!(src = %src.display(), existing = %existing.display(), "identical file already copied; skipping");
                stats.skipped += 1;
            }
            Ok(ResolvedAction::Write(final_dest)) => {
                if cfg.dry_run {
                    info!(src = %src.display(), dest = %final_dest.display(), "dry-run: would copy");
                    stats.copied += 1;
                    continue;
                }
                match copy_file(&src, &final_dest, cfg.preserve_metadata) {
                    Ok(bytes) => {
                        info!(src = %src.display(), dest = %final_dest.display(), bytes, "copied");
                        stats.copied += 1;
                        stats.bytes += bytes;
                    }
                    Err(err) => {
                        error!(code = err.code(), src = %src.display(), dest = %final_dest.display(), error = %err, "copy failed; continuing");
                        stats.errors += 1;
                    }
                }
            }
            Err(err) => {
                // A file whose digest cannot be computed cannot be safely
                // deduplicated; report it rather than writing blind.
                error!(code = err.code(), src = %src.display(), desired = %desired.display(), error = %err, "could not settle destination; skipping file");
                stats.errors += 1;
            }
        }
    }

    stats
}
