//! Collaborator contracts used by the rendering layer.
//!
//! # Responsibility
//! - Define the narrow interfaces helpers need from the host application:
//!   translation, date formatting, image tags, behavior loading, viewer.
//! - Ship default implementations good enough for standalone rendering.
//!
//! # Invariants
//! - Collaborators never mutate caller-visible state, except the behavior
//!   registry whose registrations are idempotent.

pub mod behavior;
pub mod date;
pub mod image;
pub mod translate;
pub mod viewer;

pub use behavior::{BehaviorRegistry, BEHAVIOR_CORE, BEHAVIOR_MULTISELECT, BEHAVIOR_POPOVER};
pub use date::{php_pattern_to_strftime, ChronoDateFormatter, DateFormatter};
pub use image::{ImageResolver, MediaImageResolver};
pub use translate::{CatalogError, CatalogResult, LanguageCatalog, Translator};
pub use viewer::{UserId, Viewer};
