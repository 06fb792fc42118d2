//! Configuration loading and management

use crate::core::error::{ConfigError, InvoicerResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which record store backs the collections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    JsonFile,
    InMemory,
}

/// Record store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory holding `invoices.json` and `expenses.json`
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::JsonFile,
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Login and token settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// When false, record routes are open
    pub enabled: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    /// HMAC key for bearer tokens
    pub token_secret: Option<String>,
    pub token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            username: None,
            password: None,
            token_secret: None,
            token_ttl_secs: 24 * 60 * 60,
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> InvoicerResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: format!("{}: {}", path, e),
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> InvoicerResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    ///
    /// Recognized: `AUTH_USERNAME`, `AUTH_PASSWORD`, `JWT_SECRET`,
    /// `INVOICER_DATA_DIR`, `INVOICER_BIND`.
    pub fn with_env_overrides(self) -> InvoicerResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> InvoicerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(username) = lookup("AUTH_USERNAME") {
            self.auth.username = Some(username);
        }
        if let Some(password) = lookup("AUTH_PASSWORD") {
            self.auth.password = Some(password);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.token_secret = Some(secret);
        }
        if let Some(dir) = lookup("INVOICER_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(bind) = lookup("INVOICER_BIND") {
            self.set_bind_address(&bind)?;
        }
        Ok(self)
    }

    /// Override host and port from a `host:port` string
    pub fn set_bind_address(&mut self, bind: &str) -> InvoicerResult<()> {
        let invalid = |message: &str| ConfigError::InvalidValue {
            field: "server".to_string(),
            value: bind.to_string(),
            message: message.to_string(),
        };

        let (host, port) = bind
            .rsplit_once(':')
            .ok_or_else(|| invalid("expected host:port"))?;
        let port = port
            .parse()
            .map_err(|_| invalid("port must be a number between 0 and 65535"))?;

        self.server.host = host.to_string();
        self.server.port = port;
        Ok(())
    }

    /// Check settings that depend on each other
    pub fn validate(&self) -> InvoicerResult<()> {
        if self.auth.enabled && self.auth.token_secret.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingField {
                field: "auth.token_secret".to_string(),
                context: "auth settings (set JWT_SECRET or disable auth)".to_string(),
            }
            .into());
        }
        if self.auth.token_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.token_ttl_secs".to_string(),
                value: "0".to_string(),
                message: "must be greater than zero".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
