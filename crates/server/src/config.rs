//! Server configuration from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::store::DEFAULT_MEMORY_CAPACITY;

/// Value that turns a storage backend off entirely.
pub const DISABLED: &str = "none";

/// Where a storage backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend<T> {
    /// Not configured; use the in-memory store.
    Memory,
    /// Explicitly switched off with `none`.
    Disabled,
    Configured(T),
}

impl<T> Backend<T> {
    fn from_var(value: Option<String>, parse: impl FnOnce(String) -> T) -> Self {
        match value {
            None => Self::Memory,
            Some(v) if v.trim().is_empty() => Self::Memory,
            Some(v) if v.trim().eq_ignore_ascii_case(DISABLED) => Self::Disabled,
            Some(v) => Self::Configured(parse(v)),
        }
    }
}

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (`TERSA_BIND`, default `0.0.0.0:3000`).
    pub bind: SocketAddr,
    /// Postgres connection string for summaries (`DATABASE_URL`).
    pub database: Backend<String>,
    /// Directory for archived source texts (`TERSA_ARCHIVE_DIR`).
    pub archive: Backend<PathBuf>,
    /// Whole-request deadline (`TERSA_REQUEST_TIMEOUT_SECS`, default 30).
    pub request_timeout: Duration,
    /// Page fetch deadline (`TERSA_FETCH_TIMEOUT_SECS`, default 10).
    pub fetch_timeout: Duration,
    /// Entries kept per map by the in-memory store before the oldest are
    /// evicted (`TERSA_MEMORY_CAPACITY`).
    pub memory_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            database: Backend::Memory,
            archive: Backend::Memory,
            request_timeout: Duration::from_secs(30),
            fetch_timeout: Duration::from_secs(10),
            memory_capacity: DEFAULT_MEMORY_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind = match lookup("TERSA_BIND") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key: "TERSA_BIND", value: v })?,
            None => defaults.bind,
        };

        Ok(Self {
            bind,
            database: Backend::from_var(lookup("DATABASE_URL"), |v| v),
            archive: Backend::from_var(lookup("TERSA_ARCHIVE_DIR"), PathBuf::from),
            request_timeout: secs(&lookup, "TERSA_REQUEST_TIMEOUT_SECS", defaults.request_timeout)?,
            fetch_timeout: secs(&lookup, "TERSA_FETCH_TIMEOUT_SECS", defaults.fetch_timeout)?,
            memory_capacity: positive(&lookup, "TERSA_MEMORY_CAPACITY", defaults.memory_capacity as u64)? as usize,
        })
    }
}

fn secs(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    positive(lookup, key, default.as_secs()).map(Duration::from_secs)
}

fn positive(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(v) => match v.trim().parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::Invalid { key, value: v }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind.port(), 3000);
        assert_eq!(config.database, Backend::Memory);
        assert_eq!(config.archive, Backend::Memory);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.memory_capacity, DEFAULT_MEMORY_CAPACITY);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("TERSA_BIND", "127.0.0.1:8080"),
            ("DATABASE_URL", "postgres://tersa@localhost/tersa"),
            ("TERSA_ARCHIVE_DIR", "/var/lib/tersa"),
            ("TERSA_FETCH_TIMEOUT_SECS", "5"),
            ("TERSA_MEMORY_CAPACITY", "50"),
        ])
        .unwrap();

        assert_eq!(config.bind, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.database, Backend::Configured("postgres://tersa@localhost/tersa".to_string()));
        assert_eq!(config.archive, Backend::Configured(PathBuf::from("/var/lib/tersa")));
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert_eq!(config.memory_capacity, 50);
    }

    #[test]
    fn test_disabled_backends() {
        let config = config(&[("DATABASE_URL", "none"), ("TERSA_ARCHIVE_DIR", "NONE")]).unwrap();
        assert_eq!(config.database, Backend::Disabled);
        assert_eq!(config.archive, Backend::Disabled);
    }

    #[test]
    fn test_invalid_values() {
        assert!(config(&[("TERSA_BIND", "not an address")]).is_err());
        assert!(config(&[("TERSA_REQUEST_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config(&[("TERSA_FETCH_TIMEOUT_SECS", "0")]).is_err());
        assert!(config(&[("TERSA_MEMORY_CAPACITY", "0")]).is_err());
    }
}
