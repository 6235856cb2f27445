//! Minimal user directory used to resolve lock owner names.

use super::{RepoError, RepoResult};
use crate::collab::UserId;
use rusqlite::{params, Connection, OptionalExtension};

/// SQLite-backed user directory.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts a user and returns the new id.
    pub fn create_user(&self, name: &str) -> RepoResult<UserId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepoError::InvalidData("user name must not be empty".to_string()));
        }
        self.conn
            .execute("INSERT INTO users (name) VALUES (?1);", params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn user_name(&self, id: UserId) -> RepoResult<Option<String>> {
        let name = self
            .conn
            .query_row("SELECT name FROM users WHERE id = ?1;", [id], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(name)
    }
}
