//! Extension manager list view.
//!
//! # Responsibility
//! - Render one `ExtensionPage` as the admin list form: search box, state
//!   filter, sortable table, list limit, pagination footer and the hidden
//!   request fields.
//!
//! # Invariants
//! - A status toggle is only rendered on rows that also render their
//!   checkbox, so `Joomla.listItemTask('cb{i}', ...)` always has a target.
//!   Rows locked by another user get a read-only state icon.
//! - Protected extensions never get a clickable status toggle.

use crate::collab::{Viewer, BEHAVIOR_MULTISELECT};
use crate::grid::{CheckoutRow, GridHelper, PublishState, SortHeader, SortState, StateFilter};
use crate::html::{ClientAction, Element, Markup};
use crate::model::extension::Extension;
use crate::repo::extension_repo::{ExtensionListQuery, ExtensionOrdering};
use crate::service::manage_service::ExtensionPage;

/// Prefix of the status toggle tasks (`manage.publish`, `manage.unpublish`).
pub const TASK_PREFIX: &str = "manage.";

const TABLE_ID: &str = "manageList";
const EMPTY_CELL: &str = "&#160;";
const SEARCH_FIELD: &str = "filter_search";
const LIMIT_FIELD: &str = "list[limit]";

/// Page sizes offered by the list limit; `0` lists everything.
pub const LIST_LIMITS: &[u32] = &[5, 10, 15, 20, 25, 30, 50, 100, 0];

struct Column {
    title: &'static str,
    sort: Option<ExtensionOrdering>,
    style: Option<&'static str>,
    class: Option<&'static str>,
}

const COLUMNS: &[Column] = &[
    Column {
        title: "JSTATUS",
        sort: Some(ExtensionOrdering::Status),
        style: Some("width:1%"),
        class: Some("text-center"),
    },
    Column {
        title: "COM_INSTALLER_HEADING_NAME",
        sort: Some(ExtensionOrdering::Name),
        style: None,
        class: None,
    },
    Column {
        title: "COM_INSTALLER_HEADING_LOCATION",
        sort: Some(ExtensionOrdering::Client),
        style: Some("width:10%"),
        class: None,
    },
    Column {
        title: "COM_INSTALLER_HEADING_TYPE",
        sort: Some(ExtensionOrdering::Type),
        style: Some("width:10%"),
        class: None,
    },
    Column {
        title: "JVERSION",
        sort: None,
        style: Some("width:10%"),
        class: Some("d-none d-lg-table-cell"),
    },
    Column {
        title: "JDATE",
        sort: None,
        style: Some("width:10%"),
        class: Some("d-none d-md-table-cell"),
    },
    Column {
        title: "JAUTHOR",
        sort: None,
        style: Some("width:10%"),
        class: Some("d-none d-md-table-cell"),
    },
    Column {
        title: "COM_INSTALLER_HEADING_FOLDER",
        sort: Some(ExtensionOrdering::Folder),
        style: Some("width:5%"),
        class: Some("d-none d-lg-table-cell"),
    },
    Column {
        title: "COM_INSTALLER_HEADING_PACKAGE_ID",
        sort: Some(ExtensionOrdering::PackageId),
        style: None,
        class: Some("d-none d-lg-table-cell"),
    },
    Column {
        title: "COM_INSTALLER_HEADING_ID",
        sort: Some(ExtensionOrdering::Id),
        style: Some("width:1%"),
        class: Some("d-none d-md-table-cell"),
    },
];

/// Renders the extension manager list for one viewer.
pub struct ManageView<'a> {
    grid: GridHelper<'a>,
    viewer: Viewer,
}

impl<'a> ManageView<'a> {
    pub fn new(grid: GridHelper<'a>, viewer: Viewer) -> Self {
        Self { grid, viewer }
    }

    pub fn grid(&self) -> &GridHelper<'a> {
        &self.grid
    }

    /// Renders the whole list form.
    ///
    /// `query` supplies the ordering and filter state echoed back into the
    /// form; `form_action` is the URL the form posts to.
    pub fn render(
        &self,
        page: &ExtensionPage,
        query: &ExtensionListQuery,
        form_action: &str,
    ) -> Markup {
        self.grid.behaviors().require(BEHAVIOR_MULTISELECT);
        let form_id = self.grid.config().form_id.as_str();

        let mut container = Markup::new();
        container.push(&self.filter_bar(query));
        if page.items.is_empty() {
            container.push(&self.empty_alert());
        } else {
            container.push(&self.table(page, query));
            container.push(
                &Element::new("div")
                    .attr("class", "j-pagination-footer")
                    .child(&self.list_limit(page.limit))
                    .child(
                        &page
                            .pagination()
                            .list_footer(self.grid.translator(), form_id),
                    )
                    .render(),
            );
        }
        container.push(&self.hidden_fields(page, query));

        let main = Element::new("div")
            .attr("id", "j-main-container")
            .attr("class", "j-main-container")
            .child(&container);
        let form = Element::new("form")
            .attr("action", form_action)
            .attr("method", "post")
            .attr("name", form_id)
            .attr("id", form_id)
            .child_element(main);

        Element::new("div")
            .attr("id", "installer-manage")
            .attr("class", "clearfix")
            .child_element(form)
            .render()
    }

    fn filter_bar(&self, query: &ExtensionListQuery) -> Markup {
        let selected = match query.enabled {
            Some(true) => "P",
            Some(false) => "U",
            None => "",
        };
        let mut filter = StateFilter::new(selected);
        filter.published = "JENABLED";
        filter.unpublished = "JDISABLED";

        Element::new("div")
            .attr("class", "js-stools")
            .attr("role", "search")
            .child(&self.search_bar(query))
            .child_element(
                Element::new("div")
                    .attr("class", "js-stools-container-filters")
                    .child(&self.grid.state(&filter)),
            )
            .render()
    }

    fn search_bar(&self, query: &ExtensionListQuery) -> Markup {
        let translator = self.grid.translator();
        let label = translator.translate("JSEARCH_FILTER");
        let clear = format!(
            "document.getElementById('{SEARCH_FIELD}').value='';{};",
            ClientAction::new("Joomla.submitform").to_js()
        );

        let input = Element::new("input")
            .attr("type", "text")
            .attr("name", SEARCH_FIELD)
            .attr("id", SEARCH_FIELD)
            .attr("value", query.search.as_deref().unwrap_or(""))
            .attr("class", "form-control")
            .attr("placeholder", label.as_str());
        let buttons = Element::new("span")
            .attr("class", "input-group-append")
            .child_element(
                Element::new("button")
                    .attr("type", "submit")
                    .attr("class", "btn btn-primary")
                    .attr("title", translator.translate("JSEARCH_FILTER_SUBMIT"))
                    .child_element(
                        Element::new("span")
                            .attr("class", "fa fa-search")
                            .attr("aria-hidden", "true"),
                    ),
            )
            .child_element(
                Element::new("button")
                    .attr("type", "button")
                    .attr("class", "btn btn-primary js-stools-btn-clear")
                    .attr("onclick", clear)
                    .text(&translator.translate("JSEARCH_FILTER_CLEAR")),
            );

        Element::new("div")
            .attr("class", "js-stools-container-bar")
            .child_element(
                Element::new("label")
                    .attr("for", SEARCH_FIELD)
                    .attr("class", "sr-only")
                    .text(&label),
            )
            .child_element(
                Element::new("div")
                    .attr("class", "input-group")
                    .child_element(input)
                    .child_element(buttons),
            )
            .render()
    }

    /// Page size selector; changing it resubmits the form.
    fn list_limit(&self, current: u32) -> Markup {
        let translator = self.grid.translator();
        let options: Markup = LIST_LIMITS
            .iter()
            .map(|&limit| {
                let label = if limit == 0 {
                    translator.translate("JALL")
                } else {
                    limit.to_string()
                };
                Element::new("option")
                    .attr("value", limit.to_string())
                    .flag("selected", limit == current)
                    .text(&label)
                    .render()
            })
            .collect();

        Element::new("div")
            .attr("class", "js-stools-field-list")
            .child_element(
                Element::new("label")
                    .attr("for", "list_limit")
                    .attr("class", "sr-only")
                    .text(&translator.translate("JGLOBAL_LIST_LIMIT")),
            )
            .child_element(
                Element::new("select")
                    .attr("id", "list_limit")
                    .attr("name", LIMIT_FIELD)
                    .attr("class", "custom-select")
                    .attr(
                        "onchange",
                        format!("{};", ClientAction::new("Joomla.submitform").to_js()),
                    )
                    .child(&options),
            )
            .render()
    }

    fn empty_alert(&self) -> Markup {
        let translator = self.grid.translator();
        Element::new("div")
            .attr("class", "j-alert j-alert-info")
            .child_element(
                Element::new("span")
                    .attr("class", "fa fa-info-circle")
                    .attr("aria-hidden", "true"),
            )
            .child_element(
                Element::new("span")
                    .attr("class", "sr-only")
                    .text(&translator.translate("INFO")),
            )
            .text(&translator.translate("JGLOBAL_NO_MATCHING_RESULTS"))
            .render()
    }

    fn table(&self, page: &ExtensionPage, query: &ExtensionListQuery) -> Markup {
        let translator = self.grid.translator();
        let caption = format!(
            "{}, {}",
            translator.translate("COM_INSTALLER_MANAGE_TABLE_CAPTION"),
            translator.translate("JGLOBAL_SORTED_BY")
        );

        let rows: Markup = page
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| self.row(index, item))
            .collect();

        Element::new("table")
            .attr("class", "table j-list-table")
            .attr("id", TABLE_ID)
            .child_element(
                Element::new("caption")
                    .attr("id", "captionTable")
                    .attr("class", "sr-only")
                    .text(&caption),
            )
            .child_element(Element::new("thead").child(&self.header_row(query)))
            .child_element(Element::new("tbody").child(&rows))
            .render()
    }

    fn header_row(&self, query: &ExtensionListQuery) -> Markup {
        let state = SortState::new(query.ordering.as_key(), query.direction);

        let mut cells = Element::new("td")
            .attr("style", "width:1%")
            .attr("class", "text-center")
            .child(&self.grid.check_all())
            .render();

        for column in COLUMNS {
            let content = match column.sort {
                Some(ordering) => self
                    .grid
                    .sort(&SortHeader::new(column.title, ordering.as_key()), &state),
                None => Markup::text(&self.grid.translator().translate(column.title)),
            };
            let cell = Element::new("th")
                .attr("scope", "col")
                .attr_opt("style", column.style)
                .attr_opt("class", column.class)
                .child(&content);
            cells.push(&cell.render());
        }

        Element::new("tr").child(&cells).render()
    }

    fn row(&self, index: usize, item: &Extension) -> Markup {
        let translator = self.grid.translator();
        let row_class = if item.protected {
            format!("row{} protected", index % 2)
        } else {
            format!("row{}", index % 2)
        };

        let folder = if item.folder.is_empty() {
            translator.translate("COM_INSTALLER_TYPE_NONAPPLICABLE")
        } else {
            item.folder.clone()
        };
        let package_id = if item.package_id == 0 {
            Markup::raw(EMPTY_CELL)
        } else {
            Markup::text(&item.package_id.to_string())
        };

        let name = Element::new("th")
            .attr("scope", "row")
            .child_element(Element::new("span").attr("tabindex", "0").text(&item.name))
            .child_element(
                Element::new("div")
                    .attr("role", "tooltip")
                    .attr("id", format!("tip{index}"))
                    .text(&item.description),
            );

        let mut cells = Markup::new();
        cells.push(&cell(
            Some("text-center"),
            &self.grid.checked_out(item, index, &self.viewer, None),
        ));
        cells.push(&cell(Some("text-center"), &self.status(index, item)));
        cells.push(&name.render());
        cells.push(&cell(
            None,
            &Markup::text(&translator.translate(item.client.language_key())),
        ));
        cells.push(&cell(
            None,
            &Markup::text(&translator.translate(item.kind.language_key())),
        ));
        cells.push(&cell(Some("d-none d-lg-table-cell"), &self.version(item)));
        cells.push(&cell(
            Some("d-none d-md-table-cell"),
            &text_or_blank(&item.creation_date),
        ));
        cells.push(&cell(
            Some("d-none d-md-table-cell"),
            &text_or_blank(&item.author),
        ));
        cells.push(&cell(Some("d-none d-lg-table-cell"), &Markup::text(&folder)));
        cells.push(&cell(Some("d-none d-lg-table-cell"), &package_id));
        cells.push(&cell(
            Some("d-none d-md-table-cell"),
            &Markup::text(&item.extension_id.to_string()),
        ));

        Element::new("tr")
            .attr("class", row_class)
            .child(&cells)
            .render()
    }

    /// Status toggle; a lock glyph for protected rows, `X` when the
    /// extension files are missing, a read-only icon while another user
    /// holds the row.
    fn status(&self, index: usize, item: &Extension) -> Markup {
        if item.element.is_empty() {
            return Element::new("strong").text("X").render();
        }

        if item.protected {
            let label = self
                .grid
                .translator()
                .translate("COM_INSTALLER_EXTENSION_PROTECTED");
            let mut glyph = Element::new("span")
                .attr("class", "icon-lock")
                .attr("title", label.as_str())
                .attr("aria-hidden", "true")
                .render();
            glyph.push(
                &Element::new("span")
                    .attr("class", "sr-only")
                    .text(&label)
                    .render(),
            );
            return glyph;
        }

        if item.is_locked_by_other(&self.viewer) {
            return self.grid.published_readonly(PublishState::Record(item));
        }

        self.grid
            .published(PublishState::Record(item), index, TASK_PREFIX)
    }

    fn version(&self, item: &Extension) -> Markup {
        if item.version.is_empty() {
            return Markup::raw(EMPTY_CELL);
        }

        match item.changelog_url.as_deref().filter(|url| !url.is_empty()) {
            Some(_) => {
                let title = self.grid.translator().translate_format(
                    "COM_INSTALLER_CHANGELOG_TITLE",
                    &[item.name.as_str(), item.version.as_str()],
                );
                Element::new("a")
                    .attr("data-href", format!("#changelogModal{}", item.extension_id))
                    .attr("href", "#")
                    .attr("class", "changelogModal")
                    .attr("data-js-extensionid", item.extension_id.to_string())
                    .attr("data-js-view", "manage")
                    .attr("title", title)
                    .text(&item.version)
                    .render()
            }
            None => Markup::text(&item.version),
        }
    }

    fn hidden_fields(&self, page: &ExtensionPage, query: &ExtensionListQuery) -> Markup {
        [
            ("task", String::new()),
            ("boxchecked", "0".to_string()),
            ("filter_order", query.ordering.as_key().to_string()),
            ("filter_order_Dir", query.direction.as_str().to_string()),
            ("limitstart", page.limitstart.to_string()),
        ]
        .into_iter()
        .map(|(name, value)| {
            Element::new("input")
                .attr("type", "hidden")
                .attr("name", name)
                .attr("value", value)
                .render()
        })
        .collect()
    }
}

fn cell(class: Option<&'static str>, content: &Markup) -> Markup {
    Element::new("td")
        .attr_opt("class", class)
        .child(content)
        .render()
}

fn text_or_blank(value: &str) -> Markup {
    if value.is_empty() {
        Markup::raw(EMPTY_CELL)
    } else {
        Markup::text(value)
    }
}
