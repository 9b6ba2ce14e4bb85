//! Settings parsing and data directory precedence.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use drg_cli::config::{ExtractorKind, Settings, load_settings, parse_settings, resolve_data_dir};
use tempfile::tempdir;

#[test]
fn partial_file_keeps_defaults() {
    let settings = parse_settings("[extractor]\nkind = \"remote\"\nmodel = \"local-model\"\n").unwrap();
    assert_eq!(settings.data_dir, None);
    assert_eq!(settings.extractor.kind, ExtractorKind::Remote);
    assert_eq!(settings.extractor.model, "local-model");
    assert_eq!(settings.extractor.timeout_secs, 30);
}

#[test]
fn unknown_extractor_kind_is_rejected() {
    assert!(parse_settings("[extractor]\nkind = \"oracle\"\n").is_err());
}

#[test]
fn explicit_file_is_loaded_and_must_exist() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "data_dir = \"/srv/drg\"\n").unwrap();

    let settings = load_settings(Some(&path)).unwrap();
    assert_eq!(settings.data_dir, Some(PathBuf::from("/srv/drg")));

    assert!(load_settings(Some(&dir.path().join("missing.toml"))).is_err());
}

#[test]
fn data_dir_precedence() {
    let settings = Settings {
        data_dir: Some(PathBuf::from("/from/settings")),
        ..Settings::default()
    };

    assert_eq!(
        resolve_data_dir(Some(Path::new("/from/flag")), Some(OsString::from("/from/env")), &settings),
        PathBuf::from("/from/flag")
    );
    assert_eq!(
        resolve_data_dir(None, Some(OsString::from("/from/env")), &settings),
        PathBuf::from("/from/env")
    );
    assert_eq!(
        resolve_data_dir(None, Some(OsString::new()), &settings),
        PathBuf::from("/from/settings")
    );
}

#[test]
fn default_extractor_is_heuristic() {
    let extractor = Settings::default().extractor.build().unwrap();
    assert_eq!(extractor.name(), "heuristic");
}
