use std::fs;

use kalendar_config::{ConfigError, DEFAULT_CONFIG_FILE, KalendarConfig};
use kalendar_moon::PhaseAlgorithm;

#[test]
fn explicit_path_wins() {
    let dir = tempfile::tempdir().unwrap();
    let explicit = dir.path().join("custom.toml");
    fs::write(&explicit, "[moon]\nalgorithm = \"approximation\"\n").unwrap();
    fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "[moon]\nalgorithm = \"lunation\"\n").unwrap();

    let cfg = KalendarConfig::resolve(Some(&explicit), dir.path()).unwrap();
    assert_eq!(cfg.moon.algorithm, PhaseAlgorithm::Approximation);
}

#[test]
fn falls_back_to_directory_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "[moon]\nalgorithm = \"lunation\"\n").unwrap();
    let cfg = KalendarConfig::resolve(None, dir.path()).unwrap();
    assert_eq!(cfg.moon.algorithm, PhaseAlgorithm::Lunation);
}

#[test]
fn defaults_without_any_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = KalendarConfig::resolve(None, dir.path()).unwrap();
    assert_eq!(cfg, KalendarConfig::default());
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = KalendarConfig::resolve(Some(&dir.path().join("nope.toml")), dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("nope.toml"));
}
