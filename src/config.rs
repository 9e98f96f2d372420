//! Runtime configuration for Taskboard services.
//!
//! Every setting has a default, so an empty environment yields a working
//! in-memory setup. Values are read from `TASKBOARD_*` variables.
//!
//! # Examples
//!
//! ```
//! use taskboard::config::PortalConfig;
//!
//! let config = PortalConfig::from_lookup(|key| match key {
//!     "TASKBOARD_MAX_ASSIGNEES" => Some("5".to_owned()),
//!     _ => None,
//! })
//! .expect("valid configuration");
//! assert_eq!(config.limits.max_assignees, 5);
//! assert!(config.database.is_none());
//! ```

use crate::notification::services::FanoutConfig;
use crate::task::domain::TaskLimits;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use std::str::FromStr;
use thiserror::Error;

/// Maximum task title length.
pub const MAX_TITLE_LENGTH_VAR: &str = "TASKBOARD_MAX_TITLE_LENGTH";
/// Maximum task description length.
pub const MAX_DESCRIPTION_LENGTH_VAR: &str = "TASKBOARD_MAX_DESCRIPTION_LENGTH";
/// Maximum comment length.
pub const MAX_COMMENT_LENGTH_VAR: &str = "TASKBOARD_MAX_COMMENT_LENGTH";
/// Maximum assignees per task.
pub const MAX_ASSIGNEES_VAR: &str = "TASKBOARD_MAX_ASSIGNEES";
/// Whether fan-out checks recipients against the user directory.
pub const VERIFY_RECIPIENTS_VAR: &str = "TASKBOARD_VERIFY_RECIPIENTS";
/// Characters of a comment quoted in notifications.
pub const EXCERPT_LENGTH_VAR: &str = "TASKBOARD_EXCERPT_LENGTH";
/// `PostgreSQL` connection URL. Persistence is in-memory when unset.
pub const DATABASE_URL_VAR: &str = "TASKBOARD_DATABASE_URL";
/// Connection pool size.
pub const DATABASE_MAX_CONNECTIONS_VAR: &str = "TASKBOARD_DATABASE_MAX_CONNECTIONS";

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while loading configuration or opening the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set to a value that does not parse.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value found.
        value: String,
    },

    /// The database pool could not be built.
    #[error("failed to build database pool: {0}")]
    Pool(#[from] PoolError),
}

/// `PostgreSQL` connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Connection URL.
    pub url: String,
    /// Maximum pooled connections.
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Builds an `r2d2` pool shared by the task and notification adapters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when no connection can be opened.
    pub fn build_pool(&self) -> Result<Pool<ConnectionManager<PgConnection>>, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(self.url.clone());
        Ok(Pool::builder()
            .max_size(self.max_connections)
            .build(manager)?)
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalConfig {
    /// Content limits applied by the task service.
    pub limits: TaskLimits,
    /// Notification fan-out settings.
    pub fanout: FanoutConfig,
    /// Database settings; `None` selects in-memory adapters.
    pub database: Option<DatabaseConfig>,
}

impl PortalConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let limits = TaskLimits {
            max_title_length: number(&lookup, MAX_TITLE_LENGTH_VAR)?
                .unwrap_or(defaults.limits.max_title_length),
            max_description_length: number(&lookup, MAX_DESCRIPTION_LENGTH_VAR)?
                .unwrap_or(defaults.limits.max_description_length),
            max_comment_length: number(&lookup, MAX_COMMENT_LENGTH_VAR)?
                .unwrap_or(defaults.limits.max_comment_length),
            max_assignees: number(&lookup, MAX_ASSIGNEES_VAR)?
                .unwrap_or(defaults.limits.max_assignees),
        };
        let fanout = FanoutConfig {
            verify_recipients: flag(&lookup, VERIFY_RECIPIENTS_VAR)?
                .unwrap_or(defaults.fanout.verify_recipients),
            excerpt_length: number(&lookup, EXCERPT_LENGTH_VAR)?
                .unwrap_or(defaults.fanout.excerpt_length),
        };
        let database = non_blank(&lookup, DATABASE_URL_VAR)
            .map(|url| -> Result<DatabaseConfig, ConfigError> {
                Ok(DatabaseConfig {
                    url,
                    max_connections: number(&lookup, DATABASE_MAX_CONNECTIONS_VAR)?
                        .unwrap_or(DEFAULT_MAX_CONNECTIONS),
                })
            })
            .transpose()?;

        Ok(Self {
            limits,
            fanout,
            database,
        })
    }
}

fn non_blank(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn number<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    non_blank(lookup, key)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidValue { key, value })
        })
        .transpose()
}

fn flag(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<bool>, ConfigError> {
    non_blank(lookup, key)
        .map(|value| match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue { key, value }),
        })
        .transpose()
}
