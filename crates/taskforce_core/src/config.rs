//! Process configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path and logging settings for binaries and FFI.
//!
//! # Invariants
//! - Blank values fall back to defaults.
//! - `log_level` is normalized; `log_dir` is absolute.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TASKFORCE_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "TASKFORCE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "TASKFORCE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "taskforce.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "taskforce-logs";

/// Configuration error naming the offending variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub source: LoggingError,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid `{}`: {}", self.variable, self.source)
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

impl CoreConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup`, which maps a variable name
    /// to its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let log_level = match read(LOG_LEVEL_ENV) {
            Some(raw) => normalize_level(&raw).map_err(|source| ConfigError {
                variable: LOG_LEVEL_ENV,
                source,
            })?,
            None => default_log_level(),
        };

        let log_dir = match read(LOG_DIR_ENV) {
            Some(raw) => normalize_log_dir(&raw).map_err(|source| ConfigError {
                variable: LOG_DIR_ENV,
                source,
            })?,
            None => std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}
