//! Manual-ordering save handle.

use super::GridHelper;
use crate::html::{ClientAction, Element, Markup};

const DEFAULT_ORDER_TASK: &str = "saveorder";

/// Returns the save-order call for a list of `row_count` rows.
///
/// The first argument is the last row index, `-1` for an empty list.
pub fn order_action(row_count: usize, task: &str) -> ClientAction {
    let last_index = i64::try_from(row_count).map_or(i64::MAX, |count| count - 1);
    ClientAction::new("saveorder")
        .int_arg(last_index)
        .str_arg(task)
}

impl GridHelper<'_> {
    /// Save-order handle; only the number of rows matters.
    pub fn order<T>(&self, rows: &[T], task: Option<&str>) -> Markup {
        let action = order_action(rows.len(), task.unwrap_or(DEFAULT_ORDER_TASK));
        Element::new("a")
            .attr("href", format!("javascript:{}", action.to_js()))
            .attr("rel", "tooltip")
            .attr("class", "saveorder btn btn-sm btn-secondary float-right")
            .attr("title", self.text("JLIB_HTML_SAVE_ORDER"))
            .child_element(
                Element::new("span")
                    .attr("class", "icon-caret-v")
                    .attr("aria-hidden", "true"),
            )
            .render()
    }
}

#[cfg(test)]
mod tests {
    use super::order_action;
    use crate::collab::{BehaviorRegistry, LanguageCatalog};
    use crate::grid::GridHelper;

    #[test]
    fn last_index_is_count_minus_one() {
        assert_eq!(order_action(3, "saveorder").args()[0].as_int(), Some(2));
        assert_eq!(order_action(0, "saveorder").args()[0].as_int(), Some(-1));
    }

    #[test]
    fn renders_handle_with_default_task() {
        let catalog = LanguageCatalog::en_gb();
        let behaviors = BehaviorRegistry::new();
        let grid = GridHelper::new(&catalog, &behaviors);
        let rows = ["a", "b", "c"];
        assert_eq!(
            grid.order(&rows, None).as_str(),
            concat!(
                r#"<a href="javascript:saveorder(2,'saveorder')" rel="tooltip""#,
                r#" class="saveorder btn btn-sm btn-secondary float-right" title="Save Order">"#,
                r#"<span class="icon-caret-v" aria-hidden="true"></span></a>"#
            )
        );
    }
}
