use sea_orm::ConnectOptions;
use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse, env_required};

/// Connection pool sizing and timeouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        let timeout = Duration::from_secs(8);
        Self {
            max_connections: 100,
            min_connections: 5,
            connect_timeout: timeout,
            acquire_timeout: timeout,
            idle_timeout: timeout,
            max_lifetime: timeout,
        }
    }
}

/// Where and how to reach PostgreSQL.
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    url: String,
    pub pool: PoolSettings,
    /// Emit each statement through sqlx's logger
    pub log_statements: bool,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool: PoolSettings::default(),
            log_statements: true,
        }
    }

    pub fn with_pool(mut self, pool: PoolSettings) -> Self {
        self.pool = pool;
        self
    }

    pub fn with_statement_logging(mut self, enabled: bool) -> Self {
        self.log_statements = enabled;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn into_connect_options(self) -> ConnectOptions {
        let pool = self.pool;
        let mut options = ConnectOptions::new(self.url);
        options
            .max_connections(pool.max_connections)
            .min_connections(pool.min_connections)
            .connect_timeout(pool.connect_timeout)
            .acquire_timeout(pool.acquire_timeout)
            .idle_timeout(pool.idle_timeout)
            .max_lifetime(pool.max_lifetime)
            .sqlx_logging(self.log_statements);
        options
    }
}

#[cfg(feature = "config")]
fn env_secs(key: &str) -> Result<Duration, ConfigError> {
    env_parse(key, "8").map(Duration::from_secs)
}

/// Reads `DATABASE_URL` (required), `DB_MAX_CONNECTIONS`, `DB_MIN_CONNECTIONS`,
/// `DB_{CONNECT,ACQUIRE,IDLE}_TIMEOUT_SECS`, `DB_MAX_LIFETIME_SECS` and
/// `DB_SQLX_LOGGING`. Unset values fall back to [`PoolSettings::default`].
#[cfg(feature = "config")]
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let pool = PoolSettings {
            max_connections: env_parse("DB_MAX_CONNECTIONS", "100")?,
            min_connections: env_parse("DB_MIN_CONNECTIONS", "5")?,
            connect_timeout: env_secs("DB_CONNECT_TIMEOUT_SECS")?,
            acquire_timeout: env_secs("DB_ACQUIRE_TIMEOUT_SECS")?,
            idle_timeout: env_secs("DB_IDLE_TIMEOUT_SECS")?,
            max_lifetime: env_secs("DB_MAX_LIFETIME_SECS")?,
        };

        Ok(Self::new(env_required("DATABASE_URL")?)
            .with_pool(pool)
            .with_statement_logging(env_parse("DB_SQLX_LOGGING", "true")?))
    }
}
