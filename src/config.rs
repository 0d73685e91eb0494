//! Configuration handling for the find-a-walk server.
//!
//! Values come from CLI arguments with environment variable fallbacks. `main`
//! loads a `.env` file before parsing, so the same variables can live there.

use crate::db::{DatabaseType, PoolConfig};
use crate::error::ConfigError;
use clap::Parser;
use std::time::Duration;
use url::Url;

pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

// Pool configuration defaults
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Connection pool tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolOptions {
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long a request waits for a free connection before failing as unavailable.
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub test_before_acquire: bool,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            idle_timeout: Some(Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS)),
            test_before_acquire: true,
        }
    }
}

impl PoolOptions {
    /// Validate pool options and return an error if invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::PoolOptions(
                "max_connections must be greater than 0".to_string(),
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(ConfigError::PoolOptions(format!(
                "min_connections ({}) cannot exceed max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }
        if self.acquire_timeout.is_zero() {
            return Err(ConfigError::PoolOptions(
                "acquire_timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the find-a-walk server.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "find-a-walk",
    about = "REST backend for users and walking events",
    version,
    author
)]
pub struct Config {
    /// Database connection URL (postgres://... or sqlite:...).
    /// Contains credentials - log `redacted_database_url()` instead.
    #[arg(long = "database-url", value_name = "URL", env = "DATABASE_URL")]
    pub database_url: String,

    /// Host to bind to
    #[arg(long, default_value = DEFAULT_HTTP_HOST, env = "SERVER_HOST")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, default_value_t = DEFAULT_HTTP_PORT, env = "SERVER_PORT")]
    pub port: u16,

    /// Versioned prefix the resource routes are also mounted under
    #[arg(long, default_value = DEFAULT_API_PREFIX, env = "API_PREFIX")]
    pub api_prefix: String,

    /// Maximum connections in the pool
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS, env = "DB_MAX_CONNECTIONS")]
    pub max_connections: u32,

    /// Connections kept open while idle
    #[arg(long, default_value_t = DEFAULT_MIN_CONNECTIONS, env = "DB_MIN_CONNECTIONS")]
    pub min_connections: u32,

    /// Seconds to wait for a pooled connection before answering 503
    #[arg(
        long,
        default_value_t = DEFAULT_ACQUIRE_TIMEOUT_SECS,
        env = "DB_ACQUIRE_TIMEOUT"
    )]
    pub acquire_timeout: u64,

    /// Seconds before an idle connection is closed (0 disables)
    #[arg(long, default_value_t = DEFAULT_IDLE_TIMEOUT_SECS, env = "DB_IDLE_TIMEOUT")]
    pub idle_timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Pool options assembled from the individual flags.
    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout),
            idle_timeout: (self.idle_timeout > 0).then(|| Duration::from_secs(self.idle_timeout)),
            test_before_acquire: true,
        }
    }

    /// Validate the database URL and pool flags and build the pool configuration.
    pub fn pool_config(&self) -> Result<PoolConfig, ConfigError> {
        PoolConfig::new(&self.database_url, self.pool_options())
    }

    /// Validated versioned API prefix.
    pub fn api_prefix(&self) -> Result<&str, ConfigError> {
        let prefix = self.api_prefix.as_str();
        if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
            return Err(ConfigError::ApiPrefix(prefix.to_string()));
        }
        Ok(prefix)
    }

    /// Database URL with the password masked, safe for logs.
    pub fn redacted_database_url(&self) -> String {
        redact_url(&self.database_url)
    }
}

/// Mask the password component of a connection URL.
pub fn redact_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) if url.password().is_some() => {
            // Only fails for cannot-be-a-base URLs, which have no password.
            let _ = url.set_password(Some("****"));
            url.to_string()
        }
        Ok(url) => url.to_string(),
        Err(_) => "<unparseable url>".to_string(),
    }
}

/// Detect the backend from a connection URL's scheme.
pub fn database_type(raw: &str) -> Result<DatabaseType, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    match url.scheme().to_ascii_lowercase().as_str() {
        "postgres" | "postgresql" => Ok(DatabaseType::PostgreSQL),
        "sqlite" => Ok(DatabaseType::SQLite),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}
