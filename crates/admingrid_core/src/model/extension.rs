//! Installed extension record.
//!
//! # Responsibility
//! - Describe one installed extension as listed by the extension manager.
//! - Expose lock and publish state to the grid helpers.
//!
//! # Invariants
//! - Only plugins carry a `folder` (their plugin group).
//! - Protected extensions are always reported as `ExtensionStatus::Protected`.

use crate::collab::{UserId, Viewer};
use crate::grid::{CheckoutRow, Publishable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ExtensionId = i64;

/// Extension category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionType {
    Component,
    Module,
    Plugin,
    Template,
    Language,
    Library,
    Package,
    File,
}

impl ExtensionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Module => "module",
            Self::Plugin => "plugin",
            Self::Template => "template",
            Self::Language => "language",
            Self::Library => "library",
            Self::Package => "package",
            Self::File => "file",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "component" => Some(Self::Component),
            "module" => Some(Self::Module),
            "plugin" => Some(Self::Plugin),
            "template" => Some(Self::Template),
            "language" => Some(Self::Language),
            "library" => Some(Self::Library),
            "package" => Some(Self::Package),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    pub fn language_key(self) -> &'static str {
        match self {
            Self::Component => "COM_INSTALLER_TYPE_COMPONENT",
            Self::Module => "COM_INSTALLER_TYPE_MODULE",
            Self::Plugin => "COM_INSTALLER_TYPE_PLUGIN",
            Self::Template => "COM_INSTALLER_TYPE_TEMPLATE",
            Self::Language => "COM_INSTALLER_TYPE_LANGUAGE",
            Self::Library => "COM_INSTALLER_TYPE_LIBRARY",
            Self::Package => "COM_INSTALLER_TYPE_PACKAGE",
            Self::File => "COM_INSTALLER_TYPE_FILE",
        }
    }
}

/// Application side an extension belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientLocation {
    Site,
    Administrator,
}

impl ClientLocation {
    pub fn as_db(self) -> i64 {
        match self {
            Self::Site => 0,
            Self::Administrator => 1,
        }
    }

    pub fn from_db(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Site),
            1 => Some(Self::Administrator),
            _ => None,
        }
    }

    pub fn language_key(self) -> &'static str {
        match self {
            Self::Site => "JSITE",
            Self::Administrator => "JADMINISTRATOR",
        }
    }
}

/// Effective status shown in the status column.
///
/// Ordered so that sorting by status groups disabled, enabled, protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExtensionStatus {
    Disabled,
    Enabled,
    Protected,
}

/// One row of the extension catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    pub extension_id: ExtensionId,
    /// Owning package extension, `0` when standalone.
    pub package_id: ExtensionId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ExtensionType,
    /// Install-level identifier (`com_content`, `mod_login`, ...). Empty
    /// when the extension files are missing.
    pub element: String,
    /// Plugin group; empty for other types.
    pub folder: String,
    pub client: ClientLocation,
    pub enabled: bool,
    pub protected: bool,
    pub version: String,
    /// Free-form date from the extension manifest.
    pub creation_date: String,
    pub author: String,
    pub description: String,
    pub changelog_url: Option<String>,
    /// Lock owner, `0` when not checked out.
    pub checked_out: UserId,
    /// Unix epoch milliseconds of the checkout.
    pub checked_out_time: Option<i64>,
    /// Lock owner's display name; read-only, resolved on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

impl Extension {
    /// Creates an enabled, unprotected site extension that is not persisted.
    pub fn new(name: impl Into<String>, kind: ExtensionType, element: impl Into<String>) -> Self {
        Self {
            extension_id: 0,
            package_id: 0,
            name: name.into(),
            kind,
            element: element.into(),
            folder: String::new(),
            client: ClientLocation::Site,
            enabled: true,
            protected: false,
            version: String::new(),
            creation_date: String::new(),
            author: String::new(),
            description: String::new(),
            changelog_url: None,
            checked_out: 0,
            checked_out_time: None,
            editor: None,
        }
    }

    pub fn status(&self) -> ExtensionStatus {
        if self.protected {
            ExtensionStatus::Protected
        } else if self.enabled {
            ExtensionStatus::Enabled
        } else {
            ExtensionStatus::Disabled
        }
    }

    pub fn is_checked_out(&self) -> bool {
        self.checked_out != 0
    }

    /// Validates record-level invariants before persistence.
    pub fn validate(&self) -> Result<(), ExtensionValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExtensionValidationError::EmptyName);
        }

        let has_folder = !self.folder.trim().is_empty();
        match (self.kind, has_folder) {
            (ExtensionType::Plugin, false) => {
                return Err(ExtensionValidationError::MissingPluginFolder)
            }
            (ExtensionType::Plugin, true) => {}
            (kind, true) => return Err(ExtensionValidationError::UnexpectedFolder(kind)),
            (_, false) => {}
        }

        if self.checked_out < 0 {
            return Err(ExtensionValidationError::InvalidLockOwner(self.checked_out));
        }
        if self.checked_out == 0 && self.checked_out_time.is_some() {
            return Err(ExtensionValidationError::LockTimeWithoutOwner);
        }

        Ok(())
    }
}

impl CheckoutRow for Extension {
    fn checked_out_by(&self) -> UserId {
        self.checked_out
    }

    fn editor(&self) -> Option<&str> {
        self.editor.as_deref()
    }

    fn checked_out_time(&self) -> Option<DateTime<Utc>> {
        self.checked_out_time
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    fn key(&self, field: &str) -> Option<i64> {
        match field {
            "id" | "extension_id" => Some(self.extension_id),
            "package_id" => Some(self.package_id),
            _ => None,
        }
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn is_locked_by_other(&self, viewer: &Viewer) -> bool {
        self.is_checked_out() && self.checked_out != viewer.user_id
    }
}

impl Publishable for Extension {
    fn is_published(&self) -> bool {
        self.enabled
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionValidationError {
    EmptyName,
    MissingPluginFolder,
    UnexpectedFolder(ExtensionType),
    InvalidLockOwner(UserId),
    LockTimeWithoutOwner,
}

impl Display for ExtensionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "extension name must not be empty"),
            Self::MissingPluginFolder => write!(f, "plugin extensions require a folder"),
            Self::UnexpectedFolder(kind) => {
                write!(f, "{} extensions must not have a folder", kind.as_str())
            }
            Self::InvalidLockOwner(user_id) => write!(f, "invalid lock owner id: {user_id}"),
            Self::LockTimeWithoutOwner => write!(f, "checkout time set without a lock owner"),
        }
    }
}

impl Error for ExtensionValidationError {}
