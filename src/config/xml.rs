//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a commented template on first run (unless EXT_COPY_CONFIG is set).
//!
//! Notes:
//! - This module only reads/writes the config file; directory validation
//!   happens in `config::validate`.
//! - Unknown XML fields are rejected (deny_unknown_fields) so typos surface
//!   instead of being silently ignored.

use anyhow::{Context, Result, anyhow};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "EXT_COPY_CONFIG";

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    source_root: Option<String>,
    dest_root: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    preserve_metadata: Option<bool>,
}

fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    cfg.source_root = parsed
        .source_root
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);
    cfg.dest_root = parsed
        .dest_root
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);

    if let Some(s) = parsed.log_level.as_deref() {
        if let Some(level) = LogLevel::parse(s.trim()) {
            cfg.log_level = level;
        }
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }
    cfg.preserve_metadata = parsed.preserve_metadata.unwrap_or(false);

    cfg
}

/// Load a Config from a specific XML file path (quick_xml).
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig =
        from_xml_str(&contents).with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// If EXT_COPY_CONFIG is set, load and return that Config; otherwise Ok(None).
pub fn load_config_from_xml_env() -> Result<Option<Config>> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        let cfg = load_config_from_xml_path(Path::new(&p))?;
        return Ok(Some(cfg));
    }
    Ok(None)
}

/// Try loading Config from the platform default config.xml path.
/// Returns Ok(Some(cfg)) if the file exists and parses; Ok(None) if missing.
pub fn load_config_from_default_xml() -> Result<Option<Config>> {
    let path = default_config_path().context("resolve default config path")?;
    if !path.exists() {
        return Ok(None);
    }
    let cfg = load_config_from_xml_path(&path)?;
    Ok(Some(cfg))
}

/// Create the template config file and its parent directory.
/// Refuses to write through symlinked ancestors.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
        }
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/ext_copy.log".into());

    let content = format!(
        "<!--\n  ext_copy configuration (XML)\n\n  Fields:\n    source_root        -> tree to classify (CLI positional overrides)\n    dest_root          -> extension-bucketed destination (CLI positional overrides)\n    log_level          -> quiet | normal | info | debug\n    log_file           -> path to log file (optional; stdout still used)\n    preserve_metadata  -> true/false; also copy permissions (timestamps are always copied)\n\n  Notes:\n    - CLI flags override XML values.\n-->\n<config>\n  <log_level>normal</log_level>\n  <log_file>{suggested_log}</log_file>\n  <preserve_metadata>false</preserve_metadata>\n</config>\n"
    );

    fs::write(path, content)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }

    info!("Created template config at {}", path.display());
    Ok(())
}

/// Create the default config if EXT_COPY_CONFIG is not set and none exists;
/// return the created path so the CLI can inform the user.
pub fn ensure_default_config_exists() -> Option<PathBuf> {
    if env::var_os(CONFIG_ENV).is_some() {
        return None;
    }

    let cfg_path = default_config_path().ok()?;
    if cfg_path.exists() {
        return None;
    }

    match create_template_config(&cfg_path) {
        Ok(()) => Some(cfg_path),
        Err(e) => {
            eprintln!(
                "Failed to create template config at {}: {}",
                cfg_path.display(),
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_full_config() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(
            &p,
            "<config>\n  <source_root>/data/in</source_root>\n  <dest_root>/data/out</dest_root>\n  <log_level>debug</log_level>\n  <preserve_metadata>true</preserve_metadata>\n</config>\n",
        )
        .unwrap();
        let cfg = load_config_from_xml_path(&p).unwrap();
        assert_eq!(cfg.source_root.as_deref(), Some(Path::new("/data/in")));
        assert_eq!(cfg.dest_root.as_deref(), Some(Path::new("/data/out")));
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert!(cfg.preserve_metadata);
    }

    #[test]
    fn whitespace_and_empty_fields_are_tolerated() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(
            &p,
            "<config>\n  <source_root>  /data/in  </source_root>\n  <log_file></log_file>\n</config>\n",
        )
        .unwrap();
        let cfg = load_config_from_xml_path(&p).unwrap();
        assert_eq!(cfg.source_root.as_deref(), Some(Path::new("/data/in")));
        assert!(cfg.dest_root.is_none());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(&p, "<config><not_a_field>x</not_a_field></config>").unwrap();
        assert!(load_config_from_xml_path(&p).is_err());
    }
}
