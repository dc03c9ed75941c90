use std::fs;

use tempfile::tempdir;

use super::{AppContext, AppError, ConfigError, DEFAULT_BASE_URL, ServiceConfig, load_config};

#[test]
fn defaults_point_at_local_service() {
    let config = ServiceConfig::default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.timeout().as_millis(), 10_000);
    assert!(config.validate().is_ok());
}

#[test]
fn yaml_config_fills_missing_keys_with_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("service.yaml");
    fs::write(&path, "base_url: http://images.internal:9000/api/image\n").expect("write");
    let config = load_config(&path).expect("config");
    assert_eq!(config.base_url, "http://images.internal:9000/api/image");
    assert_eq!(config.timeout_ms, 10_000);
}

#[test]
fn json_config_with_zero_timeout_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("service.json");
    fs::write(&path, r#"{"timeout_ms": 0}"#).expect("write");
    assert!(matches!(load_config(&path), Err(ConfigError::Invalid(_))));
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("service.json");
    fs::write(&path, r#"{"timeout": 5}"#).expect("write");
    assert!(matches!(load_config(&path), Err(ConfigError::SerdeJson(_))));
}

#[test]
fn overrides_win_over_file_values() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("service.yml");
    fs::write(&path, "base_url: http://a:1/api\ntimeout_ms: 50\n").expect("write");
    let context = AppContext::resolve(Some(path.as_path()), Some("http://b:2/api/".to_string()), None)
        .expect("context");
    assert_eq!(context.config().base_url, "http://b:2/api/");
    assert_eq!(context.config().timeout_ms, 50);
    assert_eq!(context.image_service().base_url(), "http://b:2/api");
}

#[test]
fn non_http_base_url_is_a_config_error() {
    let error = AppContext::resolve(None, Some("ftp://nope".to_string()), None)
        .expect_err("invalid url");
    assert!(matches!(error, AppError::Config(ConfigError::Invalid(_))));
}
