// Integration tests for configuration loading and validation.

use gradnet::config::{load_solver_config, LayerParams};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_valid_solver_config() {
    let file = write_config(
        r#"{
            "print_each": 10,
            "test_each": 100,
            "save_each": 1000,
            "lr_scale_each": 5000,
            "lr_scale": 0.5
        }"#,
    );

    let config = load_solver_config(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.print_each, 10);
    assert_eq!(config.test_each, 100);
    assert_eq!(config.save_each, 1000);
    assert_eq!(config.lr_scale_each, 5000);
    assert_eq!(config.lr_scale, 0.5);
}

#[test]
fn test_load_rejects_zero_cadence() {
    let file = write_config(
        r#"{
            "print_each": 0,
            "test_each": 100,
            "save_each": 1000,
            "lr_scale_each": 5000,
            "lr_scale": 0.5
        }"#,
    );

    let err = load_solver_config(file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("print_each"));
}

#[test]
fn test_load_rejects_negative_lr_scale() {
    let file = write_config(
        r#"{
            "print_each": 10,
            "test_each": 100,
            "save_each": 1000,
            "lr_scale_each": 5000,
            "lr_scale": -1.0
        }"#,
    );

    assert!(load_solver_config(file.path().to_str().unwrap()).is_err());
}

#[test]
fn test_load_rejects_malformed_json() {
    let file = write_config("{ not json");
    assert!(load_solver_config(file.path().to_str().unwrap()).is_err());
}

#[test]
fn test_load_rejects_missing_field() {
    let file = write_config(r#"{"print_each": 10}"#);
    assert!(load_solver_config(file.path().to_str().unwrap()).is_err());
}

#[test]
fn test_load_rejects_missing_file() {
    assert!(load_solver_config("/nonexistent/solver.json").is_err());
}

#[test]
fn test_layer_params_parse_and_lookup() {
    let params: LayerParams =
        serde_json::from_str(r#"{"drop_prob": 0.5, "momentum": 0.9}"#).unwrap();
    assert_eq!(params.get("drop_prob"), Some(0.5));
    assert_eq!(params.get("momentum"), Some(0.9));
    assert_eq!(params.get("unknown"), None);
}
