//! Admin list-grid rendering for the extension manager.
//! Grid helpers, pagination and the manage list view, backed by a SQLite
//! extension catalog, plus the installation wizard setup page.

pub mod collab;
pub mod config;
pub mod db;
pub mod grid;
pub mod html;
pub mod logging;
pub mod model;
pub mod pagination;
pub mod repo;
pub mod service;
pub mod view;

pub use collab::{
    BehaviorRegistry, ChronoDateFormatter, DateFormatter, ImageResolver, LanguageCatalog,
    MediaImageResolver, Translator, UserId, Viewer,
};
pub use config::{ConfigError, GridConfig};
pub use db::{open_db, open_db_in_memory, DbError};
pub use grid::{GridHelper, PublishState, SortDirection, SortHeader, SortState, StateFilter};
pub use html::Markup;
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status};
pub use model::extension::{ClientLocation, Extension, ExtensionId, ExtensionType};
pub use pagination::Pagination;
pub use repo::extension_repo::{
    BatchOutcome, ExtensionListQuery, ExtensionOrdering, ExtensionRepository,
    SqliteExtensionRepository,
};
pub use repo::user_repo::SqliteUserRepository;
pub use repo::{RepoError, RepoResult};
pub use service::manage_service::{ExtensionPage, ManageService, ServiceError};
pub use view::{ManageView, SetupForm, SetupView};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
