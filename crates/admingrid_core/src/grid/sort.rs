//! Sortable column headers.

use super::{GridHelper, SortDirection};
use crate::collab::{BEHAVIOR_CORE, BEHAVIOR_POPOVER};
use crate::html::{escape_js, ClientAction, Element, Markup};

const SORT_HINT_KEY: &str = "JGLOBAL_CLICK_TO_SORT_THIS_COLUMN";

/// One sortable column: what it shows and what it sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortHeader<'s> {
    /// Language key, or pre-rendered markup when it starts with `<`.
    pub title: &'s str,
    pub order_key: &'s str,
    /// Task submitted with the reorder; empty when absent.
    pub task: Option<&'s str>,
    /// Direction applied when switching to this column.
    pub new_direction: SortDirection,
    /// Tooltip language key used instead of `title`.
    pub tip: Option<&'s str>,
    /// Id of the form to submit instead of the default list form.
    pub form: Option<&'s str>,
}

impl<'s> SortHeader<'s> {
    pub fn new(title: &'s str, order_key: &'s str) -> Self {
        Self {
            title,
            order_key,
            task: None,
            new_direction: SortDirection::Asc,
            tip: None,
            form: None,
        }
    }

    pub fn task(mut self, task: &'s str) -> Self {
        self.task = Some(task);
        self
    }

    pub fn default_direction(mut self, direction: SortDirection) -> Self {
        self.new_direction = direction;
        self
    }

    pub fn tip(mut self, tip: &'s str) -> Self {
        self.tip = Some(tip);
        self
    }

    pub fn form(mut self, form: &'s str) -> Self {
        self.form = Some(form);
        self
    }
}

/// The list's current ordering, owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<'s> {
    pub order_key: &'s str,
    pub direction: SortDirection,
}

impl<'s> SortState<'s> {
    pub fn new(order_key: &'s str, direction: SortDirection) -> Self {
        Self {
            order_key,
            direction,
        }
    }

    /// Builds state from raw request values.
    pub fn parse(order_key: &'s str, direction: &str) -> Self {
        Self::new(order_key, SortDirection::parse(direction))
    }

    pub fn is_selected(&self, header: &SortHeader<'_>) -> bool {
        header.order_key == self.order_key
    }
}

/// Returns the reorder call a header click makes.
///
/// Switching columns uses the header's default direction; clicking the
/// selected column flips the current direction.
pub fn sort_action(header: &SortHeader<'_>, state: &SortState<'_>) -> ClientAction {
    let next = if state.is_selected(header) {
        state.direction.toggled()
    } else {
        header.new_direction
    };

    let action = ClientAction::new("Joomla.tableOrdering")
        .str_arg(header.order_key)
        .str_arg(next.as_str())
        .str_arg(header.task.unwrap_or(""));

    match header.form {
        Some(form) => action.expr_arg(format!("document.getElementById('{}')", escape_js(form))),
        None => action,
    }
}

impl GridHelper<'_> {
    /// Renders a clickable column header.
    pub fn sort(&self, header: &SortHeader<'_>, state: &SortState<'_>) -> Markup {
        self.behaviors.require(BEHAVIOR_CORE);
        self.behaviors.require(BEHAVIOR_POPOVER);

        let action = sort_action(header, state);
        let tooltip_key = header.tip.filter(|tip| !tip.is_empty()).unwrap_or(header.title);
        let label = if header.title.starts_with('<') {
            Markup::raw(header.title)
        } else {
            Markup::text(&self.text(header.title))
        };

        let mut link = Element::new("a")
            .attr("href", "#")
            .attr("onclick", format!("{};return false;", action.to_js()))
            .attr("class", "hasPopover")
            .attr("title", self.text(tooltip_key))
            .attr("data-content", self.text(SORT_HINT_KEY))
            .attr("data-placement", "top")
            .child(&label);

        if state.is_selected(header) {
            let glyph = match state.direction {
                SortDirection::Asc => "icon-arrow-up-3",
                SortDirection::Desc => "icon-arrow-down-3",
            };
            link = link.child_element(Element::new("span").attr("class", glyph));
        }

        link.render()
    }
}
