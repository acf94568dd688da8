//! Server configuration, loaded from YAML with environment overrides
//!
//! Precedence, lowest to highest: built-in defaults, the YAML file named
//! by `QUILL_CONFIG` (if set), then the individual `QUILL_HOST`,
//! `QUILL_PORT` and `QUILL_LOG` variables.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for {variable}: '{value}'")]
    InvalidEnv { variable: String, value: String },
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse a YAML document; missing keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Load following the full precedence chain
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var("QUILL_CONFIG") {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = env::var("QUILL_HOST") {
            self.host = host;
        }
        if let Ok(port) = env::var("QUILL_PORT") {
            self.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                variable: "QUILL_PORT".to_string(),
                value: port,
            })?;
        }
        if let Ok(level) = env::var("QUILL_LOG") {
            self.log_level = level;
        }
        Ok(())
    }

    /// The socket address string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml_str("port: 3000\n").unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host: 0.0.0.0\nport: 9000\nlog_level: debug").unwrap();

        let config = AppConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = AppConfig::from_yaml_file("/no/such/config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let err = AppConfig::from_yaml_str("port: [not a port\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
