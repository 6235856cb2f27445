//! Pagination state and list footer glue.
//!
//! # Responsibility
//! - Normalize `limitstart` against the total row count.
//! - Render page links that set `limitstart` on the list form and submit it.
//!
//! # Invariants
//! - `limitstart` is always a multiple of `limit` and never past the last
//!   page.
//! - `limit == 0` means "all rows on one page".

use crate::collab::Translator;
use crate::html::{escape_js, Element, Markup};

const DISPLAYED_PAGES: u32 = 10;

/// Offset-based pagination over `total` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    total: u32,
    limitstart: u32,
    limit: u32,
}

impl Pagination {
    pub fn new(total: u32, limitstart: u32, limit: u32) -> Self {
        if limit == 0 || total == 0 {
            return Self {
                total,
                limitstart: 0,
                limit,
            };
        }

        let mut limitstart = limitstart - limitstart % limit;
        if limitstart >= total {
            limitstart = (total - 1) / limit * limit;
        }

        Self {
            total,
            limitstart,
            limit,
        }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn limitstart(&self) -> u32 {
        self.limitstart
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of pages; `0` for an empty list.
    pub fn pages_total(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        if self.limit == 0 {
            return 1;
        }
        self.total.div_ceil(self.limit)
    }

    /// 1-based current page.
    pub fn pages_current(&self) -> u32 {
        if self.limit == 0 {
            return 1;
        }
        self.limitstart / self.limit + 1
    }

    /// Inclusive range of page numbers shown as links.
    pub fn pages_window(&self) -> (u32, u32) {
        let total = self.pages_total();
        if total == 0 {
            return (1, 0);
        }

        let start = self
            .pages_current()
            .saturating_sub(DISPLAYED_PAGES / 2)
            .max(1);
        if start + DISPLAYED_PAGES > total {
            let start = if total < DISPLAYED_PAGES {
                1
            } else {
                total - DISPLAYED_PAGES + 1
            };
            (start, total)
        } else {
            (start, start + DISPLAYED_PAGES - 1)
        }
    }

    fn limitstart_of(&self, page: u32) -> u32 {
        page.saturating_sub(1) * self.limit
    }

    /// "Page x of y"; empty for single-page lists.
    pub fn counter(&self, translator: &dyn Translator) -> String {
        if self.pages_total() <= 1 {
            return String::new();
        }
        let current = self.pages_current().to_string();
        let total = self.pages_total().to_string();
        translator.translate_format(
            "JLIB_HTML_PAGE_CURRENT_OF_TOTAL",
            &[current.as_str(), total.as_str()],
        )
    }

    /// Page links plus counter; empty for single-page lists.
    pub fn list_footer(&self, translator: &dyn Translator, form_id: &str) -> Markup {
        let pages = self.pages_total();
        if pages <= 1 {
            return Markup::new();
        }

        let current = self.pages_current();
        let last = pages;
        let mut items = Markup::new();

        items.push(&self.page_item(
            &translator.translate("JLIB_HTML_START"),
            1,
            current == 1,
            false,
            form_id,
        ));
        items.push(&self.page_item(
            &translator.translate("JPREV"),
            current.saturating_sub(1).max(1),
            current == 1,
            false,
            form_id,
        ));

        let (start, stop) = self.pages_window();
        for page in start..=stop {
            items.push(&self.page_item(
                &page.to_string(),
                page,
                false,
                page == current,
                form_id,
            ));
        }

        items.push(&self.page_item(
            &translator.translate("JNEXT"),
            (current + 1).min(last),
            current == last,
            false,
            form_id,
        ));
        items.push(&self.page_item(
            &translator.translate("JLIB_HTML_END"),
            last,
            current == last,
            false,
            form_id,
        ));

        let nav = Element::new("nav")
            .attr("role", "navigation")
            .attr("aria-label", translator.translate("JLIB_HTML_PAGINATION"))
            .child_element(
                Element::new("ul")
                    .attr("class", "pagination ml-0 mb-4")
                    .child(&items),
            );
        let counter = Element::new("div")
            .attr("class", "counter")
            .text(&self.counter(translator));

        Element::new("div")
            .attr("class", "pagination-footer")
            .child_element(nav)
            .child_element(counter)
            .render()
    }

    fn page_item(
        &self,
        label: &str,
        page: u32,
        disabled: bool,
        active: bool,
        form_id: &str,
    ) -> Markup {
        if active {
            return Element::new("li")
                .attr("class", "active page-item")
                .child_element(
                    Element::new("span")
                        .attr("aria-current", "true")
                        .attr("class", "page-link")
                        .text(label),
                )
                .render();
        }
        if disabled {
            return Element::new("li")
                .attr("class", "disabled page-item")
                .child_element(Element::new("span").attr("class", "page-link").text(label))
                .render();
        }

        let handler = format!(
            "document.getElementById('{}').limitstart.value={}; Joomla.submitform();return false;",
            escape_js(form_id),
            self.limitstart_of(page)
        );
        Element::new("li")
            .attr("class", "page-item")
            .child_element(
                Element::new("a")
                    .attr("href", "#")
                    .attr("class", "page-link")
                    .attr("onclick", handler)
                    .text(label),
            )
            .render()
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;
    use crate::collab::LanguageCatalog;

    #[test]
    fn derives_page_counts() {
        let pagination = Pagination::new(45, 20, 20);
        assert_eq!(pagination.pages_total(), 3);
        assert_eq!(pagination.pages_current(), 2);
        assert_eq!(pagination.limitstart(), 20);
    }

    #[test]
    fn snaps_and_clamps_limitstart() {
        assert_eq!(Pagination::new(45, 25, 20).limitstart(), 20);
        assert_eq!(Pagination::new(45, 400, 20).limitstart(), 40);
        assert_eq!(Pagination::new(40, 40, 20).limitstart(), 20);
    }

    #[test]
    fn zero_limit_is_single_page() {
        let pagination = Pagination::new(45, 20, 0);
        assert_eq!(pagination.pages_total(), 1);
        assert_eq!(pagination.pages_current(), 1);
        assert_eq!(pagination.limitstart(), 0);
    }

    #[test]
    fn window_is_capped_at_ten_pages() {
        assert_eq!(Pagination::new(1000, 0, 10).pages_window(), (1, 10));
        assert_eq!(Pagination::new(1000, 500, 10).pages_window(), (46, 55));
        assert_eq!(Pagination::new(1000, 990, 10).pages_window(), (91, 100));
        assert_eq!(Pagination::new(30, 0, 10).pages_window(), (1, 3));
    }

    #[test]
    fn single_page_footer_is_empty() {
        let catalog = LanguageCatalog::en_gb();
        assert!(Pagination::new(5, 0, 20).list_footer(&catalog, "adminForm").is_empty());
        assert_eq!(Pagination::new(5, 0, 20).counter(&catalog), "");
    }

    #[test]
    fn footer_links_set_limitstart() {
        let catalog = LanguageCatalog::en_gb();
        let html = Pagination::new(45, 20, 20).list_footer(&catalog, "adminForm");
        let html = html.as_str();
        assert!(html.contains(r#"<li class="active page-item"><span aria-current="true" class="page-link">2</span></li>"#));
        assert!(html.contains("limitstart.value=40; Joomla.submitform();return false;"));
        assert!(html.contains(r#"<div class="counter">Page 2 of 3</div>"#));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn first_page_disables_start_and_prev() {
        let catalog = LanguageCatalog::en_gb();
        let html = Pagination::new(45, 0, 20).list_footer(&catalog, "adminForm");
        assert!(html
            .as_str()
            .contains(r#"<li class="disabled page-item"><span class="page-link">Start</span></li>"#));
        assert!(html
            .as_str()
            .contains(r#"<li class="disabled page-item"><span class="page-link">Prev</span></li>"#));
    }
}
