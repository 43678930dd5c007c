//! Storefront API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable             | Default            | Meaning                            |
//! |----------------------|--------------------|------------------------------------|
//! | `HTTP_HOST`          | `0.0.0.0`          | Listen address                     |
//! | `HTTP_PORT`          | `8000`             | Listen port                        |
//! | `DATABASE_PATH`      | `./storefront.db`  | SQLite file                        |
//! | `DB_MAX_CONNECTIONS` | `5`                | Pool size                          |
//! | `DB_CONNECT_TIMEOUT` | `30`               | Seconds to wait for a connection   |
//! | `NOTIFY_BUFFER`      | `64`               | Per-topic notification buffer      |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Storefront API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// HTTP listen host
    pub http_host: String,

    /// HTTP listen port
    pub http_port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Maximum pooled database connections
    pub db_max_connections: u32,

    /// Seconds to wait for a pooled connection
    pub db_connect_timeout_secs: u64,

    /// Messages a notification subscriber may fall behind before it skips
    pub notify_buffer: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            http_host: "0.0.0.0".to_string(),
            http_port: 8000,
            database_path: PathBuf::from("./storefront.db"),
            db_max_connections: 5,
            db_connect_timeout_secs: 30,
            notify_buffer: 64,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            http_host: lookup("HTTP_HOST").unwrap_or(defaults.http_host),

            http_port: parse_or(&lookup, "HTTP_PORT", defaults.http_port)?,

            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,

            db_connect_timeout_secs: parse_or(
                &lookup,
                "DB_CONNECT_TIMEOUT",
                defaults.db_connect_timeout_secs,
            )?,

            notify_buffer: parse_or(&lookup, "NOTIFY_BUFFER", defaults.notify_buffer)?,
        };

        if config.http_port == 0 {
            return Err(ConfigError::MustBePositive("HTTP_PORT".to_string()));
        }
        if config.db_max_connections == 0 {
            return Err(ConfigError::MustBePositive("DB_MAX_CONNECTIONS".to_string()));
        }
        if config.db_connect_timeout_secs == 0 {
            return Err(ConfigError::MustBePositive("DB_CONNECT_TIMEOUT".to_string()));
        }
        // tokio's broadcast channel panics on zero capacity
        if config.notify_buffer == 0 {
            return Err(ConfigError::MustBePositive("NOTIFY_BUFFER".to_string()));
        }

        Ok(config)
    }

    /// `host:port` for the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// How long a request may wait for a database connection.
    pub fn db_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.db_connect_timeout_secs)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("{0} must be greater than zero")]
    MustBePositive(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("HTTP_HOST", "127.0.0.1"),
            ("HTTP_PORT", "9090"),
            ("DATABASE_PATH", "/tmp/shop.db"),
            ("NOTIFY_BUFFER", "8"),
            ("DB_CONNECT_TIMEOUT", "3"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:9090");
        assert_eq!(config.database_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.notify_buffer, 8);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_connect_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_values() {
        let err = ApiConfig::from_lookup(lookup(&[("HTTP_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "HTTP_PORT"));

        let err = ApiConfig::from_lookup(lookup(&[("NOTIFY_BUFFER", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::MustBePositive(ref key) if key == "NOTIFY_BUFFER"));

        let err = ApiConfig::from_lookup(lookup(&[("HTTP_PORT", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::MustBePositive(_)));

        let err = ApiConfig::from_lookup(lookup(&[("DB_CONNECT_TIMEOUT", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::MustBePositive(ref key) if key == "DB_CONNECT_TIMEOUT"));
    }
}
