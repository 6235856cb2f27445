//! Row selection: bulk toggle, row checkboxes and lock indicators.

use super::GridHelper;
use crate::collab::{UserId, Viewer, BEHAVIOR_CORE};
use crate::html::{escape_html, ClientAction, Element, Markup};
use chrono::{DateTime, Utc};

/// Key field used when the caller names none.
pub const DEFAULT_IDENTIFIER: &str = "id";

/// A row that can be locked for editing by one user.
pub trait CheckoutRow {
    /// Id of the user holding the lock; `0` when free.
    fn checked_out_by(&self) -> UserId;
    /// Display name of the lock holder, when known.
    fn editor(&self) -> Option<&str>;
    fn checked_out_time(&self) -> Option<DateTime<Utc>>;
    /// Integer value of a key field; `None` for unknown fields.
    fn key(&self, field: &str) -> Option<i64>;

    /// Accessible label for the row's checkbox.
    fn label(&self) -> &str {
        ""
    }

    fn is_locked_by_other(&self, viewer: &Viewer) -> bool {
        let owner = self.checked_out_by();
        owner != 0 && owner != viewer.user_id
    }
}

/// Inputs for one row checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCheckbox<'s> {
    /// 0-based render position.
    pub index: usize,
    pub record_id: i64,
    /// Locked rows render no checkbox.
    pub checked_out: bool,
    /// Field name; `[]` is appended. Defaults to the configured name.
    pub name: Option<&'s str>,
    /// Element id prefix. Defaults to the configured stub.
    pub stub: Option<&'s str>,
    pub label: &'s str,
    /// Owning form id, passed to the selection-changed call.
    pub form: Option<&'s str>,
}

impl<'s> RowCheckbox<'s> {
    pub fn new(index: usize, record_id: i64) -> Self {
        Self {
            index,
            record_id,
            checked_out: false,
            name: None,
            stub: None,
            label: "",
            form: None,
        }
    }

    pub fn checked_out(mut self, checked_out: bool) -> Self {
        self.checked_out = checked_out;
        self
    }

    pub fn name(mut self, name: &'s str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn stub(mut self, stub: &'s str) -> Self {
        self.stub = Some(stub);
        self
    }

    pub fn label(mut self, label: &'s str) -> Self {
        self.label = label;
        self
    }

    pub fn form(mut self, form: &'s str) -> Self {
        self.form = Some(form);
        self
    }
}

/// Returns the selection-changed call for a row checkbox.
pub fn row_checkbox_action(form: Option<&str>) -> ClientAction {
    let action = ClientAction::new("Joomla.isChecked").expr_arg("this.checked");
    match form {
        Some(form) => action.str_arg(form),
        None => action,
    }
}

impl GridHelper<'_> {
    /// Bulk-select checkbox with the configured name.
    pub fn check_all(&self) -> Markup {
        let action = ClientAction::new("Joomla.checkAll").expr_arg("this");
        self.check_all_with(&self.config.check_all_name, &action)
    }

    /// Bulk-select checkbox with an explicit name and click action.
    pub fn check_all_with(&self, name: &str, action: &ClientAction) -> Markup {
        self.behaviors.require(BEHAVIOR_CORE);

        Element::new("input")
            .attr("type", "checkbox")
            .attr("name", name)
            .attr("class", "j-checkbox")
            .attr("value", "")
            .attr("title", self.text("JGLOBAL_CHECK_ALL"))
            .attr("onclick", action.to_js())
            .render()
    }

    /// Row checkbox with a screen-reader label; empty for locked rows.
    pub fn id(&self, row: &RowCheckbox<'_>) -> Markup {
        if row.checked_out {
            return Markup::new();
        }

        let stub = row.stub.unwrap_or(self.config.checkbox_stub.as_str());
        let name = row.name.unwrap_or(self.config.checkbox_name.as_str());
        let element_id = format!("{stub}{}", row.index);
        let sr_text = format!("{} {}", self.text("JSELECT"), row.label);

        let label = Element::new("label")
            .attr("for", element_id.as_str())
            .child_element(
                Element::new("span")
                    .attr("class", "sr-only")
                    .text(&sr_text),
            );
        let input = Element::new("input")
            .attr("type", "checkbox")
            .attr("id", element_id.as_str())
            .attr("name", format!("{name}[]"))
            .attr("class", "j-checkbox")
            .attr("value", row.record_id.to_string())
            .attr("onclick", format!("{};", row_checkbox_action(row.form).to_js()));

        let mut html = label.render();
        html.push(&input.render());
        html
    }

    /// Lock indicator for rows held by another user, otherwise the row
    /// checkbox.
    ///
    /// A custom `identifier` selects the key field and doubles as the
    /// checkbox field name.
    pub fn checked_out<R>(
        &self,
        row: &R,
        index: usize,
        viewer: &Viewer,
        identifier: Option<&str>,
    ) -> Markup
    where
        R: CheckoutRow + ?Sized,
    {
        if row.is_locked_by_other(viewer) {
            return self.checked_out_icon(row);
        }

        match identifier.filter(|field| *field != DEFAULT_IDENTIFIER) {
            None => {
                let record_id = row.key(DEFAULT_IDENTIFIER).unwrap_or(0);
                self.id(&RowCheckbox::new(index, record_id).label(row.label()))
            }
            Some(field) => {
                let record_id = row.key(field).unwrap_or(0);
                self.id(
                    &RowCheckbox::new(index, record_id)
                        .name(field)
                        .label(row.label()),
                )
            }
        }
    }

    fn checked_out_icon<R>(&self, row: &R) -> Markup
    where
        R: CheckoutRow + ?Sized,
    {
        // Tooltip content is itself HTML, so its parts are escaped before
        // the attribute value is escaped again on render.
        let mut tip = format!(
            "<strong>{}</strong><br>{}",
            escape_html(&self.text("JLIB_HTML_CHECKED_OUT")),
            escape_html(row.editor().unwrap_or(""))
        );
        if let Some(at) = row.checked_out_time() {
            let date_pattern = self.text(&self.config.date_format_key);
            let date = self.dates.format_date(at, &date_pattern);
            let time = self.dates.format_date(at, &self.config.time_format);
            tip.push_str(&format!("<br>{}<br>{}", escape_html(&date), escape_html(&time)));
        }

        let icon = self
            .images
            .image(&format!("admin/{}", self.config.checked_out_icon), None);
        Element::new("span")
            .attr("class", "editlinktip hasTooltip")
            .attr("title", tip)
            .child(&icon)
            .render()
    }
}

#[cfg(test)]
mod tests {
    use super::{row_checkbox_action, CheckoutRow, RowCheckbox};
    use crate::collab::{BehaviorRegistry, LanguageCatalog, UserId, Viewer};
    use crate::grid::GridHelper;
    use chrono::{DateTime, TimeZone, Utc};

    struct Row {
        id: i64,
        asset_id: i64,
        locked_by: UserId,
    }

    impl CheckoutRow for Row {
        fn checked_out_by(&self) -> UserId {
            self.locked_by
        }

        fn editor(&self) -> Option<&str> {
            Some("Ann <admin>")
        }

        fn checked_out_time(&self) -> Option<DateTime<Utc>> {
            Utc.with_ymd_and_hms(2019, 3, 14, 9, 5, 0).single()
        }

        fn key(&self, field: &str) -> Option<i64> {
            match field {
                "id" => Some(self.id),
                "asset_id" => Some(self.asset_id),
                _ => None,
            }
        }
    }

    #[test]
    fn row_checkbox_markup() {
        let catalog = LanguageCatalog::en_gb();
        let behaviors = BehaviorRegistry::new();
        let grid = GridHelper::new(&catalog, &behaviors);

        let html = grid.id(&RowCheckbox::new(3, 42).label("Banner \"A\""));
        assert_eq!(
            html.as_str(),
            concat!(
                r#"<label for="cb3"><span class="sr-only">Select Banner &quot;A&quot;</span></label>"#,
                r#"<input type="checkbox" id="cb3" name="cid[]" class="j-checkbox" value="42""#,
                r#" onclick="Joomla.isChecked(this.checked);">"#
            )
        );
    }

    #[test]
    fn unlabeled_checkbox_keeps_the_separator() {
        let catalog = LanguageCatalog::en_gb();
        let behaviors = BehaviorRegistry::new();
        let grid = GridHelper::new(&catalog, &behaviors);

        let html = grid.id(&RowCheckbox::new(0, 5));
        assert!(html
            .as_str()
            .starts_with(r#"<label for="cb0"><span class="sr-only">Select </span></label>"#));
    }

    #[test]
    fn locked_checkbox_is_empty() {
        let catalog = LanguageCatalog::en_gb();
        let behaviors = BehaviorRegistry::new();
        let grid = GridHelper::new(&catalog, &behaviors);
        assert!(grid.id(&RowCheckbox::new(0, 1).checked_out(true)).is_empty());
    }

    #[test]
    fn form_scoped_selection_call() {
        assert_eq!(
            row_checkbox_action(Some("modalForm")).to_js(),
            "Joomla.isChecked(this.checked,'modalForm')"
        );
    }

    #[test]
    fn check_all_registers_core_behavior() {
        let catalog = LanguageCatalog::en_gb();
        let behaviors = BehaviorRegistry::new();
        let grid = GridHelper::new(&catalog, &behaviors);
        assert_eq!(
            grid.check_all().as_str(),
            r#"<input type="checkbox" name="checkall-toggle" class="j-checkbox" value="" title="Check All Items" onclick="Joomla.checkAll(this)">"#
        );
        assert!(behaviors.is_loaded("core"));
    }

    #[test]
    fn lock_held_by_other_user_renders_icon_with_tooltip() {
        let catalog = LanguageCatalog::en_gb();
        let behaviors = BehaviorRegistry::new();
        let grid = GridHelper::new(&catalog, &behaviors);
        let row = Row {
            id: 7,
            asset_id: 70,
            locked_by: 5,
        };

        let html = grid.checked_out(&row, 0, &Viewer::new(9), None);
        assert!(html.as_str().starts_with(r#"<span class="editlinktip hasTooltip" title="&lt;strong&gt;Checked out&lt;/strong&gt;&lt;br&gt;Ann &amp;lt;admin&amp;gt;"#));
        assert!(html.as_str().contains("Thursday, 14 March 2019&lt;br&gt;09:05"));
        assert!(html.as_str().contains(r#"src="/media/system/images/admin/checked_out.png""#));
        assert!(!html.as_str().contains("checkbox"));
    }

    #[test]
    fn own_lock_renders_checkbox() {
        let catalog = LanguageCatalog::en_gb();
        let behaviors = BehaviorRegistry::new();
        let grid = GridHelper::new(&catalog, &behaviors);
        let row = Row {
            id: 7,
            asset_id: 70,
            locked_by: 5,
        };

        let html = grid.checked_out(&row, 2, &Viewer::new(5), None);
        assert!(html.as_str().contains(r#"name="cid[]""#));
        assert!(html.as_str().contains(r#"value="7""#));
    }

    #[test]
    fn custom_identifier_selects_field_and_name() {
        let catalog = LanguageCatalog::en_gb();
        let behaviors = BehaviorRegistry::new();
        let grid = GridHelper::new(&catalog, &behaviors);
        let row = Row {
            id: 7,
            asset_id: 70,
            locked_by: 0,
        };

        let html = grid.checked_out(&row, 1, &Viewer::guest(), Some("asset_id"));
        assert!(html.as_str().contains(r#"name="asset_id[]""#));
        assert!(html.as_str().contains(r#"value="70""#));
    }
}
