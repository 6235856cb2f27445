//! Rendering configuration.
//!
//! # Responsibility
//! - Hold the defaults helpers and views fall back to when a caller omits
//!   an optional input (field names, icons, media base URL, list limit).
//! - Load overrides from JSON; every field is optional in the file.
//!
//! # Invariants
//! - `GridConfig::default()` reproduces the stock admin markup.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Json(err) => write!(f, "invalid config json: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Defaults shared by grid helpers and list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Form field name for row checkboxes (`cid` → `cid[]`).
    pub checkbox_name: String,
    /// Element id prefix for row checkboxes (`cb` → `cb0`, `cb1`, ...).
    pub checkbox_stub: String,
    /// Field name of the bulk-select checkbox.
    pub check_all_name: String,
    pub published_icon: String,
    pub unpublished_icon: String,
    pub checked_out_icon: String,
    /// Prefix for media URLs; empty means site-relative.
    pub media_base_url: String,
    /// Id and name of the list form.
    pub form_id: String,
    /// Rows per page; `0` lists everything.
    pub list_limit: u32,
    /// Language key holding the long date pattern.
    pub date_format_key: String,
    pub time_format: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            checkbox_name: "cid".to_string(),
            checkbox_stub: "cb".to_string(),
            check_all_name: "checkall-toggle".to_string(),
            published_icon: "tick.png".to_string(),
            unpublished_icon: "publish_x.png".to_string(),
            checked_out_icon: "checked_out.png".to_string(),
            media_base_url: String::new(),
            form_id: "adminForm".to_string(),
            list_limit: 20,
            date_format_key: "DATE_FORMAT_LC1".to_string(),
            time_format: "H:i".to_string(),
        }
    }
}

impl GridConfig {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rejects values that would produce unusable markup.
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("checkbox_name", &self.checkbox_name),
            ("checkbox_stub", &self.checkbox_stub),
            ("form_id", &self.form_id),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must not be empty")));
            }
            if value.chars().any(char::is_whitespace) {
                return Err(ConfigError::Invalid(format!(
                    "{field} must not contain whitespace: `{value}`"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, GridConfig};

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GridConfig::from_json_str(r#"{"list_limit": 5, "checkbox_stub": "row"}"#)
            .expect("partial config should parse");
        assert_eq!(config.list_limit, 5);
        assert_eq!(config.checkbox_stub, "row");
        assert_eq!(config.checkbox_name, "cid");
        assert_eq!(config.form_id, "adminForm");
    }

    #[test]
    fn rejects_whitespace_in_identifiers() {
        let err = GridConfig::from_json_str(r#"{"form_id": "admin form"}"#)
            .expect_err("ids with spaces are invalid");
        assert!(matches!(err, ConfigError::Invalid(message) if message.contains("form_id")));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = GridConfig::from_json_str("{").expect_err("truncated json");
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
