//! Service configuration.
//!
//! Read from the process environment by [`ServiceConfig::from_env`]; tests
//! use [`ServiceConfig::from_lookup`] with a closure instead of mutating the
//! environment.
//!
//! | variable | default |
//! |----------|---------|
//! | `DOCSTORE_HOST` | `0.0.0.0` |
//! | `DOCSTORE_PORT`, then `PORT` | `3000` |
//! | `DOCSTORE_COLLECTION` | `settings` |
//! | `DOCSTORE_DEFAULT_LIMIT` | `10` |
//! | `DOCSTORE_MAX_LIMIT` | `100` |
//! | `RUST_LOG` | `debug` (debug builds) / `info` (release) |

use thiserror::Error;

use crate::logging::default_log_filter;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: `{value}` ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("default limit {default_limit} exceeds max limit {max_limit}")]
    LimitOrder {
        default_limit: usize,
        max_limit: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Path segment the documents are served under, e.g. `/settings`.
    pub collection: String,
    pub default_limit: usize,
    pub max_limit: usize,
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            collection: "settings".to_string(),
            default_limit: 10,
            max_limit: 100,
            log_filter: default_log_filter().to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("DOCSTORE_HOST") {
            let host = host.trim();
            if host.is_empty() {
                return Err(invalid("DOCSTORE_HOST", host, "must not be empty"));
            }
            config.host = host.to_string();
        }

        let port_var = ["DOCSTORE_PORT", "PORT"]
            .into_iter()
            .find_map(|var| lookup(var).map(|value| (var, value)));
        if let Some((var, raw)) = port_var {
            config.port = raw
                .trim()
                .parse()
                .map_err(|_| invalid(var, &raw, "expected a port number"))?;
        }

        if let Some(raw) = lookup("DOCSTORE_COLLECTION") {
            let collection = raw.trim().trim_matches('/');
            if collection.is_empty() || collection.contains('/') {
                return Err(invalid(
                    "DOCSTORE_COLLECTION",
                    &raw,
                    "expected a single path segment",
                ));
            }
            config.collection = collection.to_string();
        }

        if let Some(raw) = lookup("DOCSTORE_DEFAULT_LIMIT") {
            config.default_limit = parse_limit("DOCSTORE_DEFAULT_LIMIT", &raw)?;
        }
        if let Some(raw) = lookup("DOCSTORE_MAX_LIMIT") {
            config.max_limit = parse_limit("DOCSTORE_MAX_LIMIT", &raw)?;
        }
        if config.default_limit > config.max_limit {
            return Err(ConfigError::LimitOrder {
                default_limit: config.default_limit,
                max_limit: config.max_limit,
            });
        }

        if let Some(filter) = lookup("RUST_LOG") {
            if !filter.trim().is_empty() {
                config.log_filter = filter.trim().to_string();
            }
        }

        Ok(config)
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_limit(var: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(invalid(var, raw, "must be greater than zero")),
        Ok(value) => Ok(value),
        Err(_) => Err(invalid(var, raw, "expected a positive integer")),
    }
}

fn invalid(var: &'static str, value: &str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason,
    }
}
