//! Integration tests for the Config Loader
//!
//! Covers both resolution modes against real files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use trueno_track::config::{load, LoadMode, DEFAULT_CONFIG_FILE};
use trueno_track::Error;

const BASELINE: &str = "\
project: cassava
experiment_name: baseline
fold: 3
model:
  arch: resnet50
  pretrained: true
lr: 0.0003
";

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join(DEFAULT_CONFIG_FILE);
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn test_load_relative_to_self() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), BASELINE);

    let config = load(
        &LoadMode::relative_to_self(dir.path()),
        Path::new(DEFAULT_CONFIG_FILE),
    )
    .unwrap();

    assert_eq!(config.project().unwrap(), "cassava");
    assert_eq!(config.experiment_name().unwrap(), "baseline");
    assert_eq!(config.get("fold").unwrap(), 3);
    assert_eq!(config.get("model").unwrap()["arch"], "resnet50");
    assert_eq!(config.get("model").unwrap()["pretrained"], true);
}

#[test]
fn test_load_relative_to_cwd_with_absolute_path() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), BASELINE);

    let config = load(&LoadMode::RelativeToCwd, &path).unwrap();
    assert_eq!(config.project().unwrap(), "cassava");
}

#[test]
fn test_load_nested_relative_path() {
    let dir = TempDir::new().unwrap();
    let exp_dir = dir.path().join("experiments").join("exp001");
    fs::create_dir_all(&exp_dir).unwrap();
    write_config(&exp_dir, BASELINE);

    let config = load(
        &LoadMode::relative_to_self(dir.path()),
        Path::new("experiments/exp001/config.yaml"),
    )
    .unwrap();
    assert_eq!(config.experiment_name().unwrap(), "baseline");
}

#[test]
fn test_missing_file_is_config_not_found() {
    let dir = TempDir::new().unwrap();

    let err = load(
        &LoadMode::relative_to_self(dir.path()),
        Path::new(DEFAULT_CONFIG_FILE),
    )
    .unwrap_err();

    match err {
        Error::ConfigNotFound { path } => {
            assert_eq!(path, dir.path().join(DEFAULT_CONFIG_FILE));
        }
        other => panic!("expected ConfigNotFound, got {other:?}"),
    }
}

#[test]
fn test_directory_is_config_not_found() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();

    let err = load(
        &LoadMode::relative_to_self(dir.path()),
        Path::new(DEFAULT_CONFIG_FILE),
    )
    .unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound { .. }));
}

#[test]
fn test_invalid_yaml_is_config_parse() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "project: [cassava\nexperiment_name: x\n");

    let err = load(&LoadMode::RelativeToCwd, &path).unwrap_err();
    match &err {
        Error::ConfigParse { path: reported, .. } => assert_eq!(reported, &path),
        other => panic!("expected ConfigParse, got {other:?}"),
    }
    assert!(err.to_string().contains("config.yaml"));
}

#[test]
fn test_scalar_document_is_config_parse() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "just a string\n");

    let err = load(&LoadMode::RelativeToCwd, &path).unwrap_err();
    assert!(matches!(err, Error::ConfigParse { .. }));
}

#[test]
fn test_empty_file_loads_empty_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "");

    let config = load(&LoadMode::RelativeToCwd, &path).unwrap();
    assert!(config.is_empty());
    assert!(matches!(
        config.project(),
        Err(Error::MissingField { .. })
    ));
}

#[test]
fn test_load_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), BASELINE);

    let first = load(&LoadMode::RelativeToCwd, &path).unwrap();
    let second = load(&LoadMode::RelativeToCwd, &path).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_loaded_config_keeps_file_order() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), BASELINE);

    let config = load(&LoadMode::RelativeToCwd, &path).unwrap();
    let keys: Vec<&String> = config.as_map().keys().collect();
    assert_eq!(
        keys,
        vec!["project", "experiment_name", "fold", "model", "lr"]
    );
}
