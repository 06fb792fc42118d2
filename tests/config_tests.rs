//! Tests for loading AppConfig from YAML files

use invoicer::config::{AppConfig, StorageBackend};
use invoicer::core::error::{ConfigError, InvoicerError};
use std::io::Write;
use std::path::PathBuf;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_file() {
    let file = write_config(
        r#"
server:
  host: 0.0.0.0
  port: 8080
storage:
  backend: json_file
  data_dir: /srv/invoicer
auth:
  username: admin
  password: hunter2
  token_secret: s3cret
  token_ttl_secs: 3600
"#,
    );

    let config = AppConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
    assert_eq!(config.storage.backend, StorageBackend::JsonFile);
    assert_eq!(config.storage.data_dir, PathBuf::from("/srv/invoicer"));
    assert_eq!(config.auth.username.as_deref(), Some("admin"));
    assert_eq!(config.auth.token_ttl_secs, 3600);
    assert!(config.auth.enabled);
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = AppConfig::from_yaml_file("/nonexistent/invoicer.yaml").unwrap_err();
    assert!(matches!(err, InvoicerError::Config(ConfigError::IoError { .. })));
}

#[test]
fn test_invalid_yaml_names_the_file() {
    let file = write_config("server: [unclosed");
    let path = file.path().to_str().unwrap().to_string();

    let err = AppConfig::from_yaml_file(&path).unwrap_err();
    let message = err.to_string();
    match err {
        InvoicerError::Config(ConfigError::ParseError { file, .. }) => {
            assert_eq!(file.as_deref(), Some(path.as_str()));
        }
        other => panic!("expected ParseError, got {:?}", other),
    }
    assert!(message.starts_with(&format!("Failed to parse config file '{}': ", path)));
    assert_eq!(message.matches("Failed to parse config").count(), 1);
}

#[test]
fn test_unknown_backend_is_rejected() {
    let result = AppConfig::from_yaml_str("storage:\n  backend: postgres\n");
    assert!(result.is_err());
}

#[test]
fn test_env_overrides_win_over_file() {
    let file = write_config("auth:\n  username: from-file\n  token_secret: file-secret\n");
    let config = AppConfig::from_yaml_file(file.path().to_str().unwrap())
        .unwrap()
        .with_overrides(|key| match key {
            "AUTH_USERNAME" => Some("from-env".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.auth.username.as_deref(), Some("from-env"));
    assert_eq!(config.auth.token_secret.as_deref(), Some("file-secret"));
}

#[test]
fn test_zero_ttl_is_invalid() {
    let config = AppConfig::from_yaml_str("auth:\n  token_secret: k\n  token_ttl_secs: 0\n").unwrap();
    assert!(config.validate().is_err());
}
