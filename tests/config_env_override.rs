//! EXT_COPY_CONFIG handling. Process-wide env mutation, so these run
//! serially.

use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

use ext_copy::config::xml::{CONFIG_ENV, load_config_from_xml_env};

#[test]
#[serial]
fn env_config_supplies_roots() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(
        &cfg_path,
        "<config>\n  <source_root>/srv/in</source_root>\n  <dest_root>/srv/out</dest_root>\n  <log_level>debug</log_level>\n</config>\n",
    )
    .unwrap();

    unsafe { std::env::set_var(CONFIG_ENV, &cfg_path) };
    let cfg = load_config_from_xml_env().unwrap().expect("config expected");
    unsafe { std::env::remove_var(CONFIG_ENV) };

    assert_eq!(cfg.source_root.as_deref(), Some(Path::new("/srv/in")));
    assert_eq!(cfg.dest_root.as_deref(), Some(Path::new("/srv/out")));
}

#[test]
#[serial]
fn unset_env_yields_none() {
    unsafe { std::env::remove_var(CONFIG_ENV) };
    assert!(load_config_from_xml_env().unwrap().is_none());
}

#[test]
#[serial]
fn env_pointing_at_malformed_file_is_an_error() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><source_root>/x</config>").unwrap();

    unsafe { std::env::set_var(CONFIG_ENV, &cfg_path) };
    let res = load_config_from_xml_env();
    unsafe { std::env::remove_var(CONFIG_ENV) };

    assert!(res.is_err(), "malformed explicit config must not be ignored");
}
