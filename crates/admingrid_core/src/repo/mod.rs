//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access for the extension catalog.
//! - Keep SQL details out of services and views.
//!
//! # Invariants
//! - Writes call `Extension::validate()` before SQL mutations.
//! - Caller-supplied ordering never reaches SQL text; only whitelisted
//!   expressions do.

pub mod extension_repo;
pub mod user_repo;

use crate::db::DbError;
use crate::model::extension::{ExtensionId, ExtensionValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalog persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(ExtensionValidationError),
    Db(DbError),
    NotFound(ExtensionId),
    /// Protected extensions can't be disabled.
    Protected(ExtensionId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "extension not found: {id}"),
            Self::Protected(id) => write!(f, "extension is protected: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::Protected(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ExtensionValidationError> for RepoError {
    fn from(value: ExtensionValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
