//! List-grid helpers for admin list views.
//!
//! # Responsibility
//! - Render the per-column and per-row controls of an admin list: sortable
//!   headers, bulk and row checkboxes, lock indicators, publish toggles, the
//!   state filter and the save-order handle.
//! - Emit handler calls into the client script layer with correct arguments.
//!
//! # Invariants
//! - Every helper is a pure function of its inputs and the borrowed
//!   collaborators; the only side effect is idempotent behavior registration.
//! - Sort state is read, never mutated.
//! - User-facing text is escaped; only `<`-prefixed header titles are raw.

mod order;
mod publish;
mod select;
mod sort;

pub use order::order_action;
pub use publish::{publish_action, PublishState, Publishable, StateFilter};
pub use select::{row_checkbox_action, CheckoutRow, RowCheckbox, DEFAULT_IDENTIFIER};
pub use sort::{sort_action, SortHeader, SortState};

use crate::collab::{
    BehaviorRegistry, ChronoDateFormatter, DateFormatter, ImageResolver, MediaImageResolver,
    Translator,
};
use crate::config::GridConfig;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static DEFAULT_CONFIG: Lazy<GridConfig> = Lazy::new(GridConfig::default);
static DEFAULT_IMAGES: Lazy<MediaImageResolver> = Lazy::new(MediaImageResolver::default);
static DEFAULT_DATES: Lazy<ChronoDateFormatter> = Lazy::new(ChronoDateFormatter::utc);

/// List ordering direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses request input; anything other than `desc` (any case) is `Asc`.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid helper bound to one render pass's collaborators.
///
/// Images, dates and config fall back to process-wide defaults
/// (site-relative media, UTC, `GridConfig::default()`).
pub struct GridHelper<'a> {
    translator: &'a dyn Translator,
    behaviors: &'a BehaviorRegistry,
    images: &'a dyn ImageResolver,
    dates: &'a dyn DateFormatter,
    config: &'a GridConfig,
}

impl<'a> GridHelper<'a> {
    pub fn new(translator: &'a dyn Translator, behaviors: &'a BehaviorRegistry) -> Self {
        Self {
            translator,
            behaviors,
            images: &*DEFAULT_IMAGES,
            dates: &*DEFAULT_DATES,
            config: &*DEFAULT_CONFIG,
        }
    }

    pub fn with_images(mut self, images: &'a dyn ImageResolver) -> Self {
        self.images = images;
        self
    }

    pub fn with_dates(mut self, dates: &'a dyn DateFormatter) -> Self {
        self.dates = dates;
        self
    }

    pub fn with_config(mut self, config: &'a GridConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GridConfig {
        self.config
    }

    pub fn translator(&self) -> &dyn Translator {
        self.translator
    }

    pub fn images(&self) -> &dyn ImageResolver {
        self.images
    }

    pub fn behaviors(&self) -> &BehaviorRegistry {
        self.behaviors
    }

    fn text(&self, key: &str) -> String {
        self.translator.translate(key)
    }
}
