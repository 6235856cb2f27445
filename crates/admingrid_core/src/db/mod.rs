//! Extension catalog storage.
//!
//! # Responsibility
//! - Open catalog connections (file or in-memory) ready for repositories.
//! - Bring older catalogs up to the current schema.
//!
//! # Invariants
//! - The catalog schema version lives in `PRAGMA user_version`.
//! - A failed upgrade leaves the catalog at its previous version.
//! - Catalogs written by a newer build are never opened for writing.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
pub use rusqlite::Connection;

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or upgrading a catalog.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Upgrade step `version` failed; no pending step was kept.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// Catalog schema is newer than this build understands.
    CatalogTooNew { found: u32, supported: u32 },
}

impl DbError {
    /// Schema version involved in the failure, when there is one.
    pub fn schema_version(&self) -> Option<u32> {
        match self {
            Self::Sqlite(_) => None,
            Self::Migration { version, .. } => Some(*version),
            Self::CatalogTooNew { found, .. } => Some(*found),
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "catalog storage error: {err}"),
            Self::Migration { version, source } => {
                write!(f, "catalog upgrade to schema {version} failed: {source}")
            }
            Self::CatalogTooNew { found, supported } => write!(
                f,
                "catalog schema {found} was written by a newer build (this build reads up to {supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::CatalogTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Reads the catalog schema version.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}
