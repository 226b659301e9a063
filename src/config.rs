//! Store configuration loaded from the environment.
//!
//! Only the `PostgreSQL` adapter needs configuration. There is deliberately no
//! fallback connection string: a missing `KANBAN_DATABASE_URL` is an error.
//!
//! | Variable | Default |
//! |---|---|
//! | `KANBAN_DATABASE_URL` | required |
//! | `KANBAN_POOL_MAX_SIZE` | `8` |
//! | `KANBAN_POOL_TIMEOUT_SECS` | `5` |

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "KANBAN_DATABASE_URL";
/// Environment variable holding the maximum pool size.
pub const POOL_MAX_SIZE_VAR: &str = "KANBAN_POOL_MAX_SIZE";
/// Environment variable holding the pool checkout timeout in seconds.
pub const POOL_TIMEOUT_SECS_VAR: &str = "KANBAN_POOL_TIMEOUT_SECS";

const DEFAULT_POOL_MAX_SIZE: u32 = 8;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 5;

/// Errors returned while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    /// A variable could not be parsed.
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Connection settings for the `PostgreSQL` board store.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    database_url: String,
    pool_max_size: u32,
    pool_timeout: Duration,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("database_url", &"<redacted>")
            .field("pool_max_size", &self.pool_max_size)
            .field("pool_timeout", &self.pool_timeout)
            .finish()
    }
}

impl StoreConfig {
    /// Creates a configuration with default pool settings.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
            pool_timeout: Duration::from_secs(DEFAULT_POOL_TIMEOUT_SECS),
        }
    }

    /// Loads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the database URL is missing or a pool
    /// setting is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the database URL is missing or a pool
    /// setting is not a positive integer.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup(DATABASE_URL_VAR)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;
        let pool_max_size = parse_positive(&lookup, POOL_MAX_SIZE_VAR, DEFAULT_POOL_MAX_SIZE)?;
        let timeout_secs =
            parse_positive(&lookup, POOL_TIMEOUT_SECS_VAR, DEFAULT_POOL_TIMEOUT_SECS)?;

        Ok(Self {
            database_url,
            pool_max_size,
            pool_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Sets the maximum number of pooled connections.
    #[must_use]
    pub const fn with_pool_max_size(mut self, pool_max_size: u32) -> Self {
        self.pool_max_size = pool_max_size;
        self
    }

    /// Sets the pool checkout timeout.
    #[must_use]
    pub const fn with_pool_timeout(mut self, pool_timeout: Duration) -> Self {
        self.pool_timeout = pool_timeout;
        self
    }

    /// Returns the connection URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }

    /// Returns the pool checkout timeout.
    #[must_use]
    pub const fn pool_timeout(&self) -> Duration {
        self.pool_timeout
    }
}

fn parse_positive<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let parsed = raw.trim().parse::<T>().map_err(|err| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: err.to_string(),
    })?;
    if parsed == T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "must be greater than zero".to_owned(),
        });
    }
    Ok(parsed)
}
