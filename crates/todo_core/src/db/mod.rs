//! Task store bootstrap: connection setup and schema versioning.
//!
//! # Responsibility
//! - Hand out SQLite connections whose `tasks` schema is current.
//! - Describe every way the store can fail to come up.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - A database written by a newer binary is never opened for writing.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to reach or prepare the task store.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file carries a schema version this binary does not know.
    SchemaTooNew { found: u32, supported: u32 },
    /// A schema step failed; the whole upgrade was rolled back.
    MigrationFailed {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
    /// The connection could not be reached from the calling worker.
    Unreachable(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "task store schema v{found} is newer than this build supports (v{supported})"
            ),
            Self::MigrationFailed {
                version,
                name,
                source,
            } => write!(f, "task store migration v{version} `{name}` failed: {source}"),
            Self::Unreachable(message) => write!(f, "task store unreachable: {message}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::MigrationFailed { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } | Self::Unreachable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
