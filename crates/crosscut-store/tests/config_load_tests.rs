// Integration tests for engine config loading

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crosscut_core::errors::CxErrorKind;
use crosscut_core::logging_facility::Profile;
use crosscut_store::load_engine_config;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_full_config() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("engine.toml");
    fs::write(
        &path,
        "min_base = 50\nrecommended_base = 150\nmulti_value_delimiter = \"|\"\nlog_profile = \"production\"\n",
    )
    .unwrap();

    let config = load_engine_config(&path).unwrap();

    assert_eq!(config.min_base, 50);
    assert_eq!(config.recommended_base, 150);
    assert_eq!(config.multi_value_delimiter, "|");
    assert_eq!(config.log_profile, Profile::Production);
}

#[test]
fn test_empty_config_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("engine.toml");
    fs::write(&path, "").unwrap();

    let config = load_engine_config(&path).unwrap();

    assert_eq!(config.min_base, 30);
    assert_eq!(config.recommended_base, 100);
}

#[test]
fn test_inconsistent_thresholds_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("engine.toml");
    fs::write(&path, "min_base = 200\n").unwrap();

    let err = load_engine_config(&path).unwrap_err();

    assert_eq!(err.kind(), CxErrorKind::InvalidConfig);
    assert_eq!(err.op(), Some("load_engine_config"));
}

#[test]
fn test_unknown_key_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("engine.toml");
    fs::write(&path, "min_bse = 10\n").unwrap();

    let err = load_engine_config(&path).unwrap_err();

    assert_eq!(err.kind(), CxErrorKind::Serialization);
}

#[test]
fn test_missing_config_file() {
    let tmp = TempDir::new().unwrap();

    let err = load_engine_config(&tmp.path().join("missing.toml")).unwrap_err();

    assert_eq!(err.kind(), CxErrorKind::Io);
}
