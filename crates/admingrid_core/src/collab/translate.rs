//! Translation lookup and the built-in language catalog.
//!
//! # Responsibility
//! - Resolve language keys to display strings.
//! - Format positional placeholders (`%s`, `%d`, `%2$s`, `%%`).
//!
//! # Invariants
//! - Keys are matched case-insensitively (stored upper-cased).
//! - Unknown keys resolve to themselves, so literal text passes through.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%(?:(\d+)\$)?([sd%])").expect("valid placeholder regex"));

const EN_GB_STRINGS: &[(&str, &str)] = &[
    ("DATE_FORMAT_LC1", "l, d F Y"),
    ("INFO", "Info"),
    ("JADMINISTRATOR", "Administrator"),
    ("JALL", "All"),
    ("JARCHIVED", "Archived"),
    ("JAUTHOR", "Author"),
    ("JDATE", "Date"),
    ("JDISABLED", "Disabled"),
    ("JENABLED", "Enabled"),
    ("JGLOBAL_CHECK_ALL", "Check All Items"),
    ("JGLOBAL_CLICK_TO_SORT_THIS_COLUMN", "Click to sort by this column"),
    ("JGLOBAL_LIST_LIMIT", "Number of items to display"),
    ("JGLOBAL_NO_MATCHING_RESULTS", "No Matching Results"),
    ("JGLOBAL_SORTED_BY", "sorted by"),
    ("JLIB_HTML_CHECKED_OUT", "Checked out"),
    ("JLIB_HTML_END", "End"),
    ("JLIB_HTML_PAGE_CURRENT_OF_TOTAL", "Page %s of %s"),
    ("JLIB_HTML_PAGINATION", "Pagination"),
    ("JLIB_HTML_PUBLISH_ITEM", "Publish Item"),
    ("JLIB_HTML_SAVE_ORDER", "Save Order"),
    ("JLIB_HTML_SELECT_STATE", "Select State"),
    ("JLIB_HTML_START", "Start"),
    ("JLIB_HTML_UNPUBLISH_ITEM", "Unpublish Item"),
    ("JNEXT", "Next"),
    ("JPREV", "Prev"),
    ("JPUBLISHED", "Published"),
    ("JSEARCH_FILTER", "Search"),
    ("JSEARCH_FILTER_CLEAR", "Clear"),
    ("JSEARCH_FILTER_SUBMIT", "Search"),
    ("JSELECT", "Select"),
    ("JSITE", "Site"),
    ("JSTATUS", "Status"),
    ("JTRASHED", "Trashed"),
    ("JUNPUBLISHED", "Unpublished"),
    ("JVERSION", "Version"),
    ("COM_INSTALLER_CHANGELOG_TITLE", "%s - Changelog - %s"),
    ("COM_INSTALLER_EXTENSION_PROTECTED", "Protected"),
    ("COM_INSTALLER_HEADING_FOLDER", "Folder"),
    ("COM_INSTALLER_HEADING_ID", "ID"),
    ("COM_INSTALLER_HEADING_LOCATION", "Location"),
    ("COM_INSTALLER_HEADING_NAME", "Name"),
    ("COM_INSTALLER_HEADING_PACKAGE_ID", "Package ID"),
    ("COM_INSTALLER_HEADING_TYPE", "Type"),
    ("COM_INSTALLER_MANAGE_TABLE_CAPTION", "Table of Extensions"),
    ("COM_INSTALLER_TYPE_COMPONENT", "Component"),
    ("COM_INSTALLER_TYPE_FILE", "File"),
    ("COM_INSTALLER_TYPE_LANGUAGE", "Language"),
    ("COM_INSTALLER_TYPE_LIBRARY", "Library"),
    ("COM_INSTALLER_TYPE_MODULE", "Module"),
    ("COM_INSTALLER_TYPE_NONAPPLICABLE", "N/A"),
    ("COM_INSTALLER_TYPE_PACKAGE", "Package"),
    ("COM_INSTALLER_TYPE_PLUGIN", "Plugin"),
    ("COM_INSTALLER_TYPE_TEMPLATE", "Template"),
    ("INSTL_ADMIN_EMAIL_LABEL", "Super User Email"),
    ("INSTL_ADMIN_PASSWORD_LABEL", "Super User Password"),
    ("INSTL_ADMIN_USER_LABEL", "Super User Name"),
    ("INSTL_ADMIN_USERNAME_LABEL", "Super User Username"),
    ("INSTL_CONNECT_DB", "Setup Database Connection"),
    ("INSTL_DATABASE", "Database Configuration"),
    ("INSTL_DATABASE_FIELD_VALUE_BACKUP", "Backup"),
    ("INSTL_DATABASE_FIELD_VALUE_REMOVE", "Remove"),
    ("INSTL_DATABASE_HOST_LABEL", "Host Name"),
    ("INSTL_DATABASE_NAME_LABEL", "Database Name"),
    ("INSTL_DATABASE_OLD_PROCESS_LABEL", "Old Database Process"),
    ("INSTL_DATABASE_PASSWORD_LABEL", "Password"),
    ("INSTL_DATABASE_PREFIX_LABEL", "Table Prefix"),
    ("INSTL_DATABASE_TYPE_LABEL", "Database Type"),
    ("INSTL_DATABASE_USER_LABEL", "Username"),
    ("INSTL_INSTALL_JOOMLA", "Install Joomla"),
    ("INSTL_LOGIN_DATA", "Login Data"),
    ("INSTL_SELECT_INSTALL_LANG", "Select Installation Language"),
    ("INSTL_SELECT_LANGUAGE_TITLE", "Select Language"),
    ("INSTL_SETUP_LOGIN_DATA", "Setup Login Data"),
    ("INSTL_SETUP_SITE_NAME", "Setup Site Name"),
    ("INSTL_SITE_NAME_LABEL", "Site Name"),
    ("INSTL_STEP_DATABASE", "Database Configuration"),
    ("INSTL_STEP_FINALISE", "Finalise Installation"),
    ("INSTL_STEP_INSTALLING", "Installing Site"),
    ("INSTL_STEP_LANGUAGE", "Choose Language"),
    ("INSTL_STEP_SITE", "Site Configuration"),
];

/// Translation collaborator.
pub trait Translator {
    /// Resolves one language key.
    fn translate(&self, key: &str) -> String;

    /// Resolves a key and substitutes positional placeholders.
    ///
    /// Missing arguments render as empty strings; `%d` renders non-numeric
    /// arguments as `0`.
    fn translate_format(&self, key: &str, args: &[&str]) -> String {
        format_placeholders(&self.translate(key), args)
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read language file: {err}"),
            Self::Json(err) => write!(f, "invalid language file: {err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// In-memory key/value language catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageCatalog {
    tag: String,
    strings: BTreeMap<String, String>,
}

impl LanguageCatalog {
    /// Creates an empty catalog for a language tag such as `en-GB`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            strings: BTreeMap::new(),
        }
    }

    /// Built-in English strings for every key the helpers and views use.
    pub fn en_gb() -> Self {
        let mut catalog = Self::new("en-GB");
        for (key, value) in EN_GB_STRINGS {
            catalog.insert(*key, *value);
        }
        catalog
    }

    /// Parses a flat JSON object of `KEY -> string` pairs.
    pub fn from_json_str(tag: impl Into<String>, json: &str) -> CatalogResult<Self> {
        let mut catalog = Self::new(tag);
        catalog.merge_json_str(json)?;
        Ok(catalog)
    }

    /// Merges a flat JSON object into this catalog, overriding existing keys.
    ///
    /// Returns the number of merged entries.
    pub fn merge_json_str(&mut self, json: &str) -> CatalogResult<usize> {
        let entries: BTreeMap<String, String> = serde_json::from_str(json)?;
        let merged = entries.len();
        for (key, value) in entries {
            self.insert(key, value);
        }
        Ok(merged)
    }

    /// Merges a JSON language file from disk.
    pub fn merge_file(&mut self, path: impl AsRef<Path>) -> CatalogResult<usize> {
        let json = std::fs::read_to_string(path)?;
        self.merge_json_str(&json)
    }

    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.strings
            .insert(key.as_ref().trim().to_ascii_uppercase(), value.into());
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn contains(&self, key: &str) -> bool {
        self.strings.contains_key(&key.trim().to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Translator for LanguageCatalog {
    fn translate(&self, key: &str) -> String {
        match self.strings.get(&key.trim().to_ascii_uppercase()) {
            Some(value) => value.clone(),
            None => key.to_string(),
        }
    }
}

fn format_placeholders(template: &str, args: &[&str]) -> String {
    let mut next_arg = 0usize;
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| {
            let conversion = &caps[2];
            if conversion == "%" {
                return "%".to_string();
            }

            let position = match caps.get(1) {
                Some(explicit) => explicit
                    .as_str()
                    .parse::<usize>()
                    .map_or(0, |index| index.saturating_sub(1)),
                None => {
                    let current = next_arg;
                    next_arg += 1;
                    current
                }
            };
            let value = args.get(position).copied().unwrap_or("");

            if conversion == "d" {
                value.trim().parse::<i64>().unwrap_or(0).to_string()
            } else {
                value.to_string()
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::{format_placeholders, LanguageCatalog, Translator};

    #[test]
    fn lookup_is_case_insensitive_and_falls_back_to_key() {
        let catalog = LanguageCatalog::en_gb();
        assert_eq!(catalog.translate("jpublished"), "Published");
        assert_eq!(catalog.translate("Not a key"), "Not a key");
    }

    #[test]
    fn formats_sequential_and_positional_placeholders() {
        assert_eq!(format_placeholders("%s of %s", &["1", "3"]), "1 of 3");
        assert_eq!(format_placeholders("%2$s before %1$s", &["a", "b"]), "b before a");
        assert_eq!(format_placeholders("100%% of %d", &["x"]), "100% of 0");
    }

    #[test]
    fn missing_arguments_render_empty() {
        assert_eq!(format_placeholders("[%s|%s]", &["only"]), "[only|]");
    }

    #[test]
    fn merge_json_overrides_existing_keys() {
        let mut catalog = LanguageCatalog::en_gb();
        let merged = catalog
            .merge_json_str(r#"{"jpublished": "Veröffentlicht", "NEW_KEY": "Neu"}"#)
            .expect("valid catalog json");
        assert_eq!(merged, 2);
        assert_eq!(catalog.translate("JPUBLISHED"), "Veröffentlicht");
        assert_eq!(catalog.translate("new_key"), "Neu");
    }

    #[test]
    fn rejects_non_string_values() {
        let err = LanguageCatalog::from_json_str("xx-XX", r#"{"KEY": 1}"#)
            .expect_err("numbers are not translations");
        assert!(err.to_string().contains("invalid language file"));
    }
}
