use sea_orm::ConnectOptions;
use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or_default, env_required};

/// Connection pool settings for PostgreSQL.
///
/// With the `config` feature it loads from:
/// - `DATABASE_URL` (required)
/// - `DB_MAX_CONNECTIONS` (default 20)
/// - `DB_MIN_CONNECTIONS` (default 2)
/// - `DB_CONNECT_TIMEOUT_SECS` (default 8)
/// - `DB_ACQUIRE_TIMEOUT_SECS` (default 8)
/// - `DB_SQLX_LOGGING` (default false)
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn into_connect_options(self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.url);
        options
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .sqlx_logging(self.sqlx_logging);
        options
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 20,
            min_connections: 2,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            sqlx_logging: false,
        }
    }
}

#[cfg(feature = "config")]
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_required("DATABASE_URL")?,
            max_connections: env_parse_or_default("DB_MAX_CONNECTIONS", "20")?,
            min_connections: env_parse_or_default("DB_MIN_CONNECTIONS", "2")?,
            connect_timeout_secs: env_parse_or_default("DB_CONNECT_TIMEOUT_SECS", "8")?,
            acquire_timeout_secs: env_parse_or_default("DB_ACQUIRE_TIMEOUT_SECS", "8")?,
            sqlx_logging: env_parse_or_default("DB_SQLX_LOGGING", "false")?,
        })
    }
}
