//! Publish toggles and the state filter.

use super::GridHelper;
use crate::html::{ClientAction, Element, Markup};

/// A record carrying a publish flag.
pub trait Publishable {
    fn is_published(&self) -> bool;
}

/// Input shape of the publish toggle: a bare flag or a record.
#[derive(Clone, Copy)]
pub enum PublishState<'r> {
    Flag(bool),
    Record(&'r dyn Publishable),
}

impl PublishState<'_> {
    pub fn is_on(&self) -> bool {
        match self {
            Self::Flag(value) => *value,
            Self::Record(record) => record.is_published(),
        }
    }
}

impl From<bool> for PublishState<'_> {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Returns the row task call for a toggle: clicking an on state unpublishes.
pub fn publish_action(is_on: bool, index: usize, stub: &str, prefix: &str) -> ClientAction {
    let task = if is_on { "unpublish" } else { "publish" };
    ClientAction::new("Joomla.listItemTask")
        .str_arg(format!("{stub}{index}"))
        .str_arg(format!("{prefix}{task}"))
}

/// Labels and selection for the state filter dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateFilter<'s> {
    /// Currently selected value; `*` matches no option.
    pub selected: &'s str,
    pub published: &'s str,
    pub unpublished: &'s str,
    pub archived: Option<&'s str>,
    pub trashed: Option<&'s str>,
}

impl Default for StateFilter<'_> {
    fn default() -> Self {
        Self {
            selected: "*",
            published: "JPUBLISHED",
            unpublished: "JUNPUBLISHED",
            archived: None,
            trashed: None,
        }
    }
}

impl<'s> StateFilter<'s> {
    pub fn new(selected: &'s str) -> Self {
        Self {
            selected,
            ..Self::default()
        }
    }

    pub fn archived(mut self, label: &'s str) -> Self {
        self.archived = Some(label);
        self
    }

    pub fn trashed(mut self, label: &'s str) -> Self {
        self.trashed = Some(label);
        self
    }
}

impl GridHelper<'_> {
    /// Publish toggle using the configured on/off icons.
    pub fn published(&self, state: PublishState<'_>, index: usize, prefix: &str) -> Markup {
        self.published_with_icons(
            state,
            index,
            &self.config.published_icon,
            &self.config.unpublished_icon,
            prefix,
        )
    }

    pub fn published_with_icons(
        &self,
        state: PublishState<'_>,
        index: usize,
        on_icon: &str,
        off_icon: &str,
        prefix: &str,
    ) -> Markup {
        let is_on = state.is_on();
        let (icon, alt, title) = if is_on {
            (on_icon, "JPUBLISHED", "JLIB_HTML_UNPUBLISH_ITEM")
        } else {
            (off_icon, "JUNPUBLISHED", "JLIB_HTML_PUBLISH_ITEM")
        };
        let action = publish_action(is_on, index, &self.config.checkbox_stub, prefix);
        let alt_text = self.text(alt);
        let image = self
            .images
            .image(&format!("admin/{icon}"), Some(alt_text.as_str()));

        Element::new("a")
            .attr("href", "#")
            .attr("onclick", format!("return {}", action.to_js()))
            .attr("title", self.text(title))
            .child(&image)
            .render()
    }

    /// Publish state icon with no toggle, for rows whose checkbox is not
    /// rendered.
    pub fn published_readonly(&self, state: PublishState<'_>) -> Markup {
        let (icon, alt) = if state.is_on() {
            (&self.config.published_icon, "JPUBLISHED")
        } else {
            (&self.config.unpublished_icon, "JUNPUBLISHED")
        };
        let alt_text = self.text(alt);
        let image = self
            .images
            .image(&format!("admin/{icon}"), Some(alt_text.as_str()));

        Element::new("span")
            .attr("class", "disabled")
            .attr("title", alt_text.as_str())
            .child(&image)
            .render()
    }

    /// Ordered `(value, label)` pairs of the state filter.
    pub fn state_options(&self, filter: &StateFilter<'_>) -> Vec<(&'static str, String)> {
        let mut options = vec![
            ("", format!("- {} -", self.text("JLIB_HTML_SELECT_STATE"))),
            ("P", self.text(filter.published)),
            ("U", self.text(filter.unpublished)),
        ];
        if let Some(archived) = filter.archived.filter(|label| !label.is_empty()) {
            options.push(("A", self.text(archived)));
        }
        if let Some(trashed) = filter.trashed.filter(|label| !label.is_empty()) {
            options.push(("T", self.text(trashed)));
        }
        options
    }

    /// State filter dropdown; changing it submits the list form.
    pub fn state(&self, filter: &StateFilter<'_>) -> Markup {
        let options: Markup = self
            .state_options(filter)
            .into_iter()
            .map(|(value, label)| {
                Element::new("option")
                    .attr("value", value)
                    .flag("selected", value == filter.selected)
                    .text(&label)
                    .render()
            })
            .collect();

        let submit = ClientAction::new("Joomla.submitform");
        Element::new("select")
            .attr("id", "filter_state")
            .attr("name", "filter_state")
            .attr("class", "form-control")
            .attr("size", "1")
            .attr("onchange", format!("{};", submit.to_js()))
            .child(&options)
            .render()
    }
}

#[cfg(test)]
mod tests {
    use super::{publish_action, PublishState, Publishable, StateFilter};
    use crate::collab::{BehaviorRegistry, LanguageCatalog};
    use crate::grid::GridHelper;

    struct Article {
        published: bool,
    }

    impl Publishable for Article {
        fn is_published(&self) -> bool {
            self.published
        }
    }

    #[test]
    fn on_state_offers_unpublish() {
        let action = publish_action(true, 4, "cb", "articles.");
        assert_eq!(action.to_js(), "Joomla.listItemTask('cb4','articles.unpublish')");
        let action = publish_action(false, 4, "cb", "");
        assert_eq!(action.args()[1].as_str(), Some("publish"));
    }

    #[test]
    fn renders_toggle_for_flag_and_record() {
        let catalog = LanguageCatalog::en_gb();
        let behaviors = BehaviorRegistry::new();
        let grid = GridHelper::new(&catalog, &behaviors);

        let from_flag = grid.published(true.into(), 0, "");
        assert_eq!(
            from_flag.as_str(),
            concat!(
                r##"<a href="#" onclick="return Joomla.listItemTask('cb0','unpublish')" title="Unpublish Item">"##,
                r#"<img src="/media/system/images/admin/tick.png" alt="Published"></a>"#
            )
        );

        let article = Article { published: true };
        let from_record = grid.published(PublishState::Record(&article), 0, "");
        assert_eq!(from_flag, from_record);
    }

    #[test]
    fn off_state_uses_off_icon() {
        let catalog = LanguageCatalog::en_gb();
        let behaviors = BehaviorRegistry::new();
        let grid = GridHelper::new(&catalog, &behaviors);
        let html = grid.published_with_icons(false.into(), 1, "on.png", "off.png", "");
        assert!(html.as_str().contains("admin/off.png"));
        assert!(html.as_str().contains(r#"alt="Unpublished""#));
        assert!(html.as_str().contains(r#"title="Publish Item""#));
    }

    #[test]
    fn readonly_state_has_no_row_task() {
        let catalog = LanguageCatalog::en_gb();
        let behaviors = BehaviorRegistry::new();
        let grid = GridHelper::new(&catalog, &behaviors);

        let html = grid.published_readonly(false.into());
        assert_eq!(
            html.as_str(),
            concat!(
                r#"<span class="disabled" title="Unpublished">"#,
                r#"<img src="/media/system/images/admin/publish_x.png" alt="Unpublished"></span>"#
            )
        );
        assert!(!grid
            .published_readonly(true.into())
            .as_str()
            .contains("listItemTask"));
    }

    #[test]
    fn state_dropdown_selects_current_value() {
        let catalog = LanguageCatalog::en_gb();
        let behaviors = BehaviorRegistry::new();
        let grid = GridHelper::new(&catalog, &behaviors);
        let html = grid.state(&StateFilter::new("U"));
        assert_eq!(
            html.as_str(),
            concat!(
                r#"<select id="filter_state" name="filter_state" class="form-control" size="1" onchange="Joomla.submitform();">"#,
                r#"<option value="">- Select State -</option>"#,
                r#"<option value="P">Published</option>"#,
                r#"<option value="U" selected>Unpublished</option></select>"#
            )
        );
    }

    #[test]
    fn empty_optional_labels_are_not_offered() {
        let catalog = LanguageCatalog::en_gb();
        let behaviors = BehaviorRegistry::new();
        let grid = GridHelper::new(&catalog, &behaviors);
        let keys: Vec<&str> = grid
            .state_options(&StateFilter::default().archived("").trashed("JTRASHED"))
            .into_iter()
            .map(|(value, _)| value)
            .collect();
        assert_eq!(keys, vec!["", "P", "U", "T"]);
    }
}
