//! Local SQLite project store.
//!
//! `open_db` and `open_db_in_memory` only hand out connections whose
//! `projects` schema is current. Errors name the store they came from.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod open;
mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::LATEST_SCHEMA_VERSION;

pub type DbResult<T> = Result<T, DbError>;

/// Where a store connection points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

impl StoreLocation {
    /// `mode=` value for `db_open` events.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }
}

impl Display for StoreLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "`{}`", path.display()),
            Self::Memory => f.write_str("in-memory store"),
        }
    }
}

#[derive(Debug)]
pub enum DbError {
    /// Statement failure on an already open store.
    Sqlite(rusqlite::Error),
    /// Connecting or applying connection pragmas failed.
    Open {
        location: StoreLocation,
        source: rusqlite::Error,
    },
    /// A schema step failed. Nothing from the batch was committed.
    SchemaStep {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
    /// The store was written by a newer build.
    UnsupportedSchemaVersion {
        location: StoreLocation,
        found: u32,
        supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "project store query failed: {err}"),
            Self::Open { location, source } => {
                write!(f, "cannot open project store {location}: {source}")
            }
            Self::SchemaStep {
                version,
                name,
                source,
            } => write!(f, "schema step {version} ({name}) failed: {source}"),
            Self::UnsupportedSchemaVersion {
                location,
                found,
                supported,
            } => write!(
                f,
                "project store {location} has schema v{found}, this build reads up to v{supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(source) | Self::Open { source, .. } | Self::SchemaStep { source, .. } => {
                Some(source)
            }
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
