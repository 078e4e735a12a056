//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Both directories are optional positionals: they may also come from the
//!   XML config, and running with neither prints usage (and succeeds).
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};

/// CLI wrapper for the ext_copy library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Copy a directory tree into extension-sorted buckets, deduplicated by content hash"
)]
pub struct Args {
    /// Directory tree to classify.
    #[arg(value_name = "SOURCE_DIR", value_hint = ValueHint::DirPath)]
    pub source_dir: Option<PathBuf>,

    /// Destination root; per-extension subdirectories are created under it.
    #[arg(value_name = "DEST_DIR", value_hint = ValueHint::DirPath)]
    pub dest_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Write logs to this file in addition to stdout.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Print where ext_copy will look for the config file (or EXT_COPY_CONFIG
    /// if set), then exit.
    #[arg(long, help = "Print the config file location used by ext_copy and exit")]
    pub print_config: bool,

    /// Dry-run: report decisions but do not modify the filesystem.
    #[arg(long, help = "Show what would be copied/skipped, but do not modify files")]
    pub dry_run: bool,

    /// Also preserve permissions (and xattrs when the feature is enabled).
    /// Timestamps are always copied.
    #[arg(long, help = "Also preserve permissions (and xattrs when enabled); slower")]
    pub preserve_metadata: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Source directory with shell-quoting artifacts stripped.
    pub fn resolved_source(&self) -> Option<PathBuf> {
        self.source_dir.as_deref().map(sanitize_path)
    }

    /// Destination directory with shell-quoting artifacts stripped.
    pub fn resolved_dest(&self) -> Option<PathBuf> {
        self.dest_dir.as_deref().map(sanitize_path)
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset
    /// flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(src) = self.resolved_source() {
            cfg.source_root = Some(src);
        }
        if let Some(dest) = self.resolved_dest() {
            cfg.dest_root = Some(dest);
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.preserve_metadata {
            cfg.preserve_metadata = true;
        }
    }
}

/// Trim surrounding quotes and a stray trailing separator left by shell
/// escaping mistakes (quoted paths pasted from other tools).
fn sanitize_path(p: &std::path::Path) -> PathBuf {
    let s = p.to_string_lossy();
    let trimmed = s.trim();
    let mut inner = if (trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() > 1)
        || (trimmed.starts_with('\'') && trimmed.ends_with('\'') && trimmed.len() > 1)
    {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.trim_matches(|c| c == '\'' || c == '"').to_string()
    };

    // One trailing slash/backslash is dropped (but never a bare root).
    if (inner.ends_with('/') || inner.ends_with('\\')) && inner.len() > 1 {
        inner.pop();
    }

    PathBuf::from(inner)
}

pub fn parse() -> Args {
    Args::parse()
}
