//! Idempotent client-side behavior registration.

use crate::html::{Element, Markup};
use std::cell::RefCell;

/// Base client script (`Joomla.*` namespace).
pub const BEHAVIOR_CORE: &str = "core";
/// Popover tooltips used by sortable headers.
pub const BEHAVIOR_POPOVER: &str = "bootstrap.popover";
/// Shift-click range selection across row checkboxes.
pub const BEHAVIOR_MULTISELECT: &str = "multiselect";

/// Collects the behaviors a rendered page needs.
///
/// Requiring a behavior N times has the same effect as requiring it once;
/// first-registration order is preserved for script emission.
#[derive(Debug, Default)]
pub struct BehaviorRegistry {
    loaded: RefCell<Vec<&'static str>>,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(&self, behavior: &'static str) {
        let mut loaded = self.loaded.borrow_mut();
        if !loaded.contains(&behavior) {
            log::trace!("event=behavior_require module=collab behavior={behavior}");
            loaded.push(behavior);
        }
    }

    pub fn is_loaded(&self, behavior: &str) -> bool {
        self.loaded.borrow().iter().any(|loaded| *loaded == behavior)
    }

    pub fn loaded(&self) -> Vec<&'static str> {
        self.loaded.borrow().clone()
    }

    /// Renders one `<script>` tag per registered behavior.
    pub fn script_tags(&self, media_base_url: &str) -> Markup {
        let base = media_base_url.trim_end_matches('/');
        self.loaded
            .borrow()
            .iter()
            .map(|behavior| {
                Element::new("script")
                    .attr("src", format!("{base}/media/system/js/{}", script_file(behavior)))
                    .render()
            })
            .collect()
    }
}

fn script_file(behavior: &str) -> String {
    format!("{}.js", behavior.replace('.', "-"))
}

#[cfg(test)]
mod tests {
    use super::{BehaviorRegistry, BEHAVIOR_CORE, BEHAVIOR_POPOVER};

    #[test]
    fn require_is_idempotent_and_ordered() {
        let registry = BehaviorRegistry::new();
        registry.require(BEHAVIOR_POPOVER);
        registry.require(BEHAVIOR_CORE);
        registry.require(BEHAVIOR_POPOVER);
        assert_eq!(registry.loaded(), vec![BEHAVIOR_POPOVER, BEHAVIOR_CORE]);
        assert!(registry.is_loaded("core"));
        assert!(!registry.is_loaded("multiselect"));
    }

    #[test]
    fn renders_script_tags() {
        let registry = BehaviorRegistry::new();
        registry.require(BEHAVIOR_CORE);
        registry.require(BEHAVIOR_POPOVER);
        assert_eq!(
            registry.script_tags("/site/").as_str(),
            r#"<script src="/site/media/system/js/core.js"></script><script src="/site/media/system/js/bootstrap-popover.js"></script>"#
        );
    }
}
