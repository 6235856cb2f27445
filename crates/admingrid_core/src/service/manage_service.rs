//! Extension manager use-case service.
//!
//! # Responsibility
//! - Produce one normalized list page for the manage view.
//! - Dispatch list tasks (`manage.publish`, `manage.unpublish`,
//!   `manage.checkin`) submitted with a row selection.
//! - Take and release edit locks on behalf of a viewer.
//!
//! # Invariants
//! - Protected extensions are never disabled; bulk tasks skip them.
//! - A page offset never points past the last page.
//! - A list task changes all selected rows or none of them.

use crate::collab::{UserId, Viewer};
use crate::model::extension::{Extension, ExtensionId};
use crate::pagination::Pagination;
use crate::repo::extension_repo::{ExtensionListQuery, ExtensionRepository};
use crate::repo::RepoError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const TASK_PUBLISH: &str = "manage.publish";
pub const TASK_UNPUBLISH: &str = "manage.unpublish";
pub const TASK_CHECKIN: &str = "manage.checkin";

/// List task submitted by the manage form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageTask {
    Publish,
    Unpublish,
    Checkin,
}

impl ManageTask {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            TASK_PUBLISH => Some(Self::Publish),
            TASK_UNPUBLISH => Some(Self::Unpublish),
            TASK_CHECKIN => Some(Self::Checkin),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Publish => TASK_PUBLISH,
            Self::Unpublish => TASK_UNPUBLISH,
            Self::Checkin => TASK_CHECKIN,
        }
    }
}

/// One rendered page of the extension list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionPage {
    pub items: Vec<Extension>,
    /// Row count across all pages for the same filters.
    pub total: u32,
    /// Normalized offset of `items[0]`.
    pub limitstart: u32,
    /// Page size; `0` means all rows.
    pub limit: u32,
}

impl ExtensionPage {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.total, self.limitstart, self.limit)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    UnknownTask(String),
    EmptySelection,
    /// Row is locked by another user.
    CheckedOut { id: ExtensionId, by: UserId },
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTask(task) => write!(f, "unknown list task: {task}"),
            Self::EmptySelection => write!(f, "no rows selected"),
            Self::CheckedOut { id, by } => {
                write!(f, "extension {id} is checked out by user {by}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::UnknownTask(_) | Self::EmptySelection | Self::CheckedOut { .. } => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service behind the extension manager list.
pub struct ManageService<R: ExtensionRepository> {
    repo: R,
}

impl<R: ExtensionRepository> ManageService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads one page of extensions.
    ///
    /// # Contract
    /// - `query.limit = None` or `Some(0)` returns all matching rows.
    /// - `query.offset` is snapped to a page boundary and clamped to the last
    ///   page before querying.
    pub fn list_page(&self, query: &ExtensionListQuery) -> ServiceResult<ExtensionPage> {
        let total = self.repo.count_extensions(query)?;
        let limit = query.limit.unwrap_or(0);
        let pagination = Pagination::new(total, query.offset, limit);

        let mut page_query = query.clone();
        page_query.limit = (limit > 0).then_some(limit);
        page_query.offset = pagination.limitstart();
        let items = self.repo.list_extensions(&page_query)?;

        Ok(ExtensionPage {
            items,
            total,
            limitstart: pagination.limitstart(),
            limit,
        })
    }

    pub fn get(&self, id: ExtensionId) -> ServiceResult<Option<Extension>> {
        Ok(self.repo.get_extension(id)?)
    }

    /// Runs a submitted list task over the selected ids.
    ///
    /// Returns how many rows were changed. Protected extensions are skipped
    /// by `manage.unpublish`; a missing id fails the whole task and leaves
    /// every selected row unchanged.
    pub fn run_task(&self, task: &str, ids: &[ExtensionId]) -> ServiceResult<usize> {
        let Some(parsed) = ManageTask::parse(task) else {
            warn!("event=list_task module=service status=error task={task} reason=unknown");
            return Err(ServiceError::UnknownTask(task.to_string()));
        };
        if ids.is_empty() {
            return Err(ServiceError::EmptySelection);
        }

        let affected = match parsed {
            ManageTask::Publish | ManageTask::Unpublish => {
                let outcome = self
                    .repo
                    .set_enabled_many(ids, parsed == ManageTask::Publish)?;
                for id in &outcome.skipped_protected {
                    warn!(
                        "event=list_task module=service status=skipped task={} id={id} reason=protected",
                        parsed.as_str()
                    );
                }
                outcome.changed
            }
            ManageTask::Checkin => self.repo.checkin_many(ids)?,
        };

        info!(
            "event=list_task module=service status=ok task={} selected={} affected={affected}",
            parsed.as_str(),
            ids.len()
        );
        Ok(affected)
    }

    /// Locks an extension for editing by `viewer`.
    ///
    /// Re-checking out a row the viewer already holds refreshes the lock time.
    pub fn checkout(&self, id: ExtensionId, viewer: &Viewer, at_epoch_ms: i64) -> ServiceResult<()> {
        let extension = self
            .repo
            .get_extension(id)?
            .ok_or(RepoError::NotFound(id))?;
        if extension.is_checked_out() && extension.checked_out != viewer.user_id {
            return Err(ServiceError::CheckedOut {
                id,
                by: extension.checked_out,
            });
        }

        self.repo.checkout(id, viewer.user_id, at_epoch_ms)?;
        Ok(())
    }

    pub fn checkin(&self, id: ExtensionId) -> ServiceResult<()> {
        self.repo.checkin(id)?;
        Ok(())
    }
}
