//! Extension catalog repository and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/count/get/create APIs over `extensions`.
//! - Provide state and lock mutations used by list tasks.
//!
//! # Invariants
//! - List and count apply identical filters.
//! - Ordering ties are broken by `extension_id ASC`, so pages are stable.
//! - Read paths reject invalid persisted state instead of masking it.

use super::{bool_to_int, RepoError, RepoResult};
use crate::collab::UserId;
use crate::grid::SortDirection;
use crate::model::extension::{ClientLocation, Extension, ExtensionId, ExtensionType};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const EXTENSION_SELECT_SQL: &str = "SELECT
    e.extension_id,
    e.package_id,
    e.name,
    e.type,
    e.element,
    e.folder,
    e.client_id,
    e.enabled,
    e.protected,
    e.version,
    e.creation_date,
    e.author,
    e.description,
    e.changelog_url,
    e.checked_out,
    e.checked_out_time,
    u.name AS editor
FROM extensions e
LEFT JOIN users u ON u.id = e.checked_out";

const SEARCH_ID_PREFIX: &str = "id:";

/// Sortable columns of the extension list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExtensionOrdering {
    #[default]
    Name,
    Status,
    Client,
    Type,
    Folder,
    PackageId,
    Id,
}

impl ExtensionOrdering {
    /// Parses a request order key; unknown keys fall back to `Name`.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "status" => Self::Status,
            "client_translated" => Self::Client,
            "type_translated" => Self::Type,
            "folder_translated" => Self::Folder,
            "package_id" => Self::PackageId,
            "extension_id" => Self::Id,
            _ => Self::Name,
        }
    }

    /// Order key as used by list headers and request state.
    pub fn as_key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Status => "status",
            Self::Client => "client_translated",
            Self::Type => "type_translated",
            Self::Folder => "folder_translated",
            Self::PackageId => "package_id",
            Self::Id => "extension_id",
        }
    }

    fn sql_expr(self) -> &'static str {
        match self {
            Self::Name => "e.name COLLATE NOCASE",
            Self::Status => "CASE WHEN e.protected = 1 THEN 2 ELSE e.enabled END",
            Self::Client => "e.client_id",
            Self::Type => "e.type",
            Self::Folder => "e.folder",
            Self::PackageId => "e.package_id",
            Self::Id => "e.extension_id",
        }
    }
}

/// Filter, ordering and pagination options for listing extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionListQuery {
    pub ordering: ExtensionOrdering,
    pub direction: SortDirection,
    /// `Some(true)` enabled only, `Some(false)` disabled only.
    pub enabled: Option<bool>,
    pub kind: Option<ExtensionType>,
    pub client: Option<ClientLocation>,
    /// Name substring, or `id:<n>` for an exact id.
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for the extension catalog.
pub trait ExtensionRepository {
    fn create_extension(&self, extension: &Extension) -> RepoResult<ExtensionId>;
    fn get_extension(&self, id: ExtensionId) -> RepoResult<Option<Extension>>;
    fn list_extensions(&self, query: &ExtensionListQuery) -> RepoResult<Vec<Extension>>;
    fn count_extensions(&self, query: &ExtensionListQuery) -> RepoResult<u32>;
    fn set_enabled(&self, id: ExtensionId, enabled: bool) -> RepoResult<()>;
    /// Sets `enabled` on every id in one transaction.
    ///
    /// Protected ids are skipped when disabling; any other failure rolls
    /// back the whole batch.
    fn set_enabled_many(&self, ids: &[ExtensionId], enabled: bool) -> RepoResult<BatchOutcome>;
    fn checkout(&self, id: ExtensionId, user_id: UserId, at_epoch_ms: i64) -> RepoResult<()>;
    fn checkin(&self, id: ExtensionId) -> RepoResult<()>;
    /// Releases every lock in one transaction; a missing id rolls back all.
    fn checkin_many(&self, ids: &[ExtensionId]) -> RepoResult<usize>;
}

/// Result of a bulk state change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub changed: usize,
    pub skipped_protected: Vec<ExtensionId>,
}

/// SQLite-backed extension repository.
pub struct SqliteExtensionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteExtensionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ExtensionRepository for SqliteExtensionRepository<'_> {
    fn create_extension(&self, extension: &Extension) -> RepoResult<ExtensionId> {
        extension.validate()?;

        self.conn.execute(
            "INSERT INTO extensions (
                package_id,
                name,
                type,
                element,
                folder,
                client_id,
                enabled,
                protected,
                version,
                creation_date,
                author,
                description,
                changelog_url,
                checked_out,
                checked_out_time
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15);",
            params![
                extension.package_id,
                extension.name.as_str(),
                extension.kind.as_str(),
                extension.element.as_str(),
                extension.folder.as_str(),
                extension.client.as_db(),
                bool_to_int(extension.enabled),
                bool_to_int(extension.protected),
                extension.version.as_str(),
                extension.creation_date.as_str(),
                extension.author.as_str(),
                extension.description.as_str(),
                extension.changelog_url.as_deref(),
                extension.checked_out,
                extension.checked_out_time,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_extension(&self, id: ExtensionId) -> RepoResult<Option<Extension>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EXTENSION_SELECT_SQL} WHERE e.extension_id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_extension_row(row)?));
        }
        Ok(None)
    }

    fn list_extensions(&self, query: &ExtensionListQuery) -> RepoResult<Vec<Extension>> {
        let (filter_sql, mut bind_values) = build_filters(query);
        let mut sql = format!(
            "{EXTENSION_SELECT_SQL} WHERE 1 = 1{filter_sql} ORDER BY {} {}, e.extension_id ASC",
            query.ordering.sql_expr(),
            query.direction.as_sql()
        );

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut extensions = Vec::new();
        while let Some(row) = rows.next()? {
            extensions.push(parse_extension_row(row)?);
        }

        Ok(extensions)
    }

    fn count_extensions(&self, query: &ExtensionListQuery) -> RepoResult<u32> {
        let (filter_sql, bind_values) = build_filters(query);
        let sql = format!("SELECT COUNT(*) FROM extensions e WHERE 1 = 1{filter_sql};");
        let count: i64 = self
            .conn
            .query_row(&sql, params_from_iter(bind_values), |row| row.get(0))?;
        u32::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("extension count out of range: {count}")))
    }

    fn set_enabled(&self, id: ExtensionId, enabled: bool) -> RepoResult<()> {
        set_enabled_on(self.conn, id, enabled)
    }

    fn set_enabled_many(&self, ids: &[ExtensionId], enabled: bool) -> RepoResult<BatchOutcome> {
        let tx = self.conn.unchecked_transaction()?;
        let mut outcome = BatchOutcome::default();
        for &id in ids {
            match set_enabled_on(&tx, id, enabled) {
                Ok(()) => outcome.changed += 1,
                Err(RepoError::Protected(id)) => outcome.skipped_protected.push(id),
                Err(err) => return Err(err),
            }
        }
        tx.commit()?;
        Ok(outcome)
    }

    fn checkout(&self, id: ExtensionId, user_id: UserId, at_epoch_ms: i64) -> RepoResult<()> {
        if user_id <= 0 {
            return Err(RepoError::InvalidData(format!(
                "checkout requires a signed-in user, got {user_id}"
            )));
        }

        let changed = self.conn.execute(
            "UPDATE extensions
             SET checked_out = ?1, checked_out_time = ?2
             WHERE extension_id = ?3;",
            params![user_id, at_epoch_ms, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn checkin(&self, id: ExtensionId) -> RepoResult<()> {
        checkin_on(self.conn, id)
    }

    fn checkin_many(&self, ids: &[ExtensionId]) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        for &id in ids {
            checkin_on(&tx, id)?;
        }
        tx.commit()?;
        Ok(ids.len())
    }
}

fn set_enabled_on(conn: &Connection, id: ExtensionId, enabled: bool) -> RepoResult<()> {
    let protected: Option<i64> = conn
        .query_row(
            "SELECT protected FROM extensions WHERE extension_id = ?1;",
            [id],
            |row| row.get(0),
        )
        .optional()?;

    match protected {
        None => return Err(RepoError::NotFound(id)),
        Some(1) if !enabled => return Err(RepoError::Protected(id)),
        Some(_) => {}
    }

    conn.execute(
        "UPDATE extensions SET enabled = ?1 WHERE extension_id = ?2;",
        params![bool_to_int(enabled), id],
    )?;
    Ok(())
}

fn checkin_on(conn: &Connection, id: ExtensionId) -> RepoResult<()> {
    let changed = conn.execute(
        "UPDATE extensions
         SET checked_out = 0, checked_out_time = NULL
         WHERE extension_id = ?1;",
        [id],
    )?;
    if changed == 0 {
        return Err(RepoError::NotFound(id));
    }
    Ok(())
}

fn build_filters(query: &ExtensionListQuery) -> (String, Vec<Value>) {
    let mut sql = String::new();
    let mut bind_values: Vec<Value> = Vec::new();

    if let Some(enabled) = query.enabled {
        sql.push_str(" AND e.enabled = ?");
        bind_values.push(Value::Integer(bool_to_int(enabled)));
    }

    if let Some(kind) = query.kind {
        sql.push_str(" AND e.type = ?");
        bind_values.push(Value::Text(kind.as_str().to_string()));
    }

    if let Some(client) = query.client {
        sql.push_str(" AND e.client_id = ?");
        bind_values.push(Value::Integer(client.as_db()));
    }

    let search = query.search.as_deref().map(str::trim).unwrap_or("");
    if !search.is_empty() {
        match search
            .strip_prefix(SEARCH_ID_PREFIX)
            .map(|id| id.trim().parse::<i64>())
        {
            Some(Ok(id)) => {
                sql.push_str(" AND e.extension_id = ?");
                bind_values.push(Value::Integer(id));
            }
            _ => {
                sql.push_str(" AND e.name LIKE ? ESCAPE '\\'");
                bind_values.push(Value::Text(format!("%{}%", escape_like(search))));
            }
        }
    }

    (sql, bind_values)
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn parse_extension_row(row: &Row<'_>) -> RepoResult<Extension> {
    let type_text: String = row.get("type")?;
    let kind = ExtensionType::parse(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid extension type `{type_text}` in extensions.type"))
    })?;

    let client_id: i64 = row.get("client_id")?;
    let client = ClientLocation::from_db(client_id).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid client id `{client_id}` in extensions.client_id"
        ))
    })?;

    let extension = Extension {
        extension_id: row.get("extension_id")?,
        package_id: row.get("package_id")?,
        name: row.get("name")?,
        kind,
        element: row.get("element")?,
        folder: row.get("folder")?,
        client,
        enabled: parse_flag(row, "enabled")?,
        protected: parse_flag(row, "protected")?,
        version: row.get("version")?,
        creation_date: row.get("creation_date")?,
        author: row.get("author")?,
        description: row.get("description")?,
        changelog_url: row.get("changelog_url")?,
        checked_out: row.get("checked_out")?,
        checked_out_time: row.get("checked_out_time")?,
        editor: row.get("editor")?,
    };
    extension.validate()?;
    Ok(extension)
}

fn parse_flag(row: &Row<'_>, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid {column} value `{other}` in extensions.{column}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_like, ExtensionOrdering};

    #[test]
    fn unknown_ordering_falls_back_to_name() {
        assert_eq!(
            ExtensionOrdering::parse("name; DROP TABLE extensions"),
            ExtensionOrdering::Name
        );
        assert_eq!(
            ExtensionOrdering::parse("client_translated"),
            ExtensionOrdering::Client
        );
    }

    #[test]
    fn order_keys_round_trip() {
        for ordering in [
            ExtensionOrdering::Name,
            ExtensionOrdering::Status,
            ExtensionOrdering::Client,
            ExtensionOrdering::Type,
            ExtensionOrdering::Folder,
            ExtensionOrdering::PackageId,
            ExtensionOrdering::Id,
        ] {
            assert_eq!(ExtensionOrdering::parse(ordering.as_key()), ordering);
        }
    }

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
