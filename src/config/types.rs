//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration used by the classifier.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tree to walk; every regular file under it is classified
    pub source_root: Option<PathBuf>,
    /// Root of the extension-bucketed destination tree
    pub dest_root: Option<PathBuf>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, report decisions but do not modify the filesystem
    pub dry_run: bool,
    /// If true, also preserve permissions (timestamps are always copied)
    pub preserve_metadata: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: None,
            dest_root: None,
            log_level: LogLevel::Normal,
            // paths::default_log_path() returns Result<PathBuf>; store Some(path) on success.
            log_file: paths::default_log_path().ok(),
            dry_run: false,
            preserve_metadata: false,
        }
    }
}

impl Config {
    /// Construct a Config with explicit roots; other fields use defaults.
    pub fn new(source_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: Some(source_root.into()),
            dest_root: Some(dest_root.into()),
            ..Default::default()
        }
    }
}
