//! Configuration management for the server.

use std::env;
use std::time::Duration;

/// Default endpoint used as the remote quote source.
pub const DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// SQLite connection URL for the key-value store
    pub database_url: String,
    /// Remote collection endpoint (GET to pull, POST to push)
    pub remote_url: String,
    /// How many remote records are taken per sync cycle
    pub fetch_limit: usize,
    /// Timeout for each remote request
    pub remote_timeout: Duration,
    /// Delay between scheduled sync cycles, `None` disables the timer
    pub sync_interval: Option<Duration>,
    /// How long a sync status message stays visible
    pub status_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://quotes.db?mode=rwc".to_string());

        let remote_url = lookup("REMOTE_URL").unwrap_or_else(|| DEFAULT_REMOTE_URL.to_string());

        let fetch_limit = parse_number(&lookup, "REMOTE_FETCH_LIMIT", 10)? as usize;
        let remote_timeout = Duration::from_secs(parse_number(&lookup, "REMOTE_TIMEOUT_SECS", 10)?);

        let sync_interval = match parse_number(&lookup, "SYNC_INTERVAL_SECS", 30)? {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        let status_ttl = Duration::from_secs(parse_number(&lookup, "STATUS_CLEAR_SECS", 3)?);

        Ok(Self {
            host,
            port,
            database_url,
            remote_url,
            fetch_limit,
            remote_timeout,
            sync_interval,
            status_ttl,
        })
    }
}

fn parse_number(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: u64,
) -> Result<u64, ConfigError> {
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidNumber(key)),
        None => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value")]
    InvalidPort,

    #[error("Invalid value for {0}: expected a non-negative integer")]
    InvalidNumber(&'static str),
}
