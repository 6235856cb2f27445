//! Explicit current-user context.

pub type UserId = i64;

/// The user a page is rendered for.
///
/// Passed explicitly into helpers that compare lock ownership, instead of
/// reading a process-wide session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewer {
    pub user_id: UserId,
}

impl Viewer {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Anonymous viewer; owns no locks.
    pub fn guest() -> Self {
        Self { user_id: 0 }
    }

    pub fn is_guest(&self) -> bool {
        self.user_id == 0
    }
}
