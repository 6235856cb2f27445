use admingrid_core::collab::{BEHAVIOR_CORE, BEHAVIOR_POPOVER};
use admingrid_core::grid::{publish_action, sort_action, RowCheckbox};
use admingrid_core::{
    BehaviorRegistry, GridHelper, LanguageCatalog, PublishState, SortDirection, SortHeader,
    SortState, StateFilter,
};

fn catalog() -> LanguageCatalog {
    LanguageCatalog::en_gb()
}

#[test]
fn switching_columns_uses_the_header_default_direction_without_glyph() {
    let lang = catalog();
    let behaviors = BehaviorRegistry::new();
    let grid = GridHelper::new(&lang, &behaviors);
    let state = SortState::new("a.title", SortDirection::Desc);

    let header = SortHeader::new("JGLOBAL_TITLE", "a.id");
    assert_eq!(
        sort_action(&header, &state).to_js(),
        "Joomla.tableOrdering('a.id','asc','')"
    );
    let html = grid.sort(&header, &state);
    assert!(!html.as_str().contains("icon-arrow"));

    let desc_first = header.default_direction(SortDirection::Desc);
    assert_eq!(
        sort_action(&desc_first, &state).to_js(),
        "Joomla.tableOrdering('a.id','desc','')"
    );
}

#[test]
fn clicking_the_selected_column_toggles_direction_and_shows_glyph() {
    let lang = catalog();
    let behaviors = BehaviorRegistry::new();
    let grid = GridHelper::new(&lang, &behaviors);
    let header = SortHeader::new("COM_INSTALLER_HEADING_NAME", "name").task("manage.sort");

    let asc = SortState::parse("name", "ASC");
    assert_eq!(
        sort_action(&header, &asc).to_js(),
        "Joomla.tableOrdering('name','desc','manage.sort')"
    );
    let html = grid.sort(&header, &asc);
    assert!(html.as_str().contains(r#"<span class="icon-arrow-up-3"></span>"#));
    assert!(html.as_str().contains(">Name<"));

    let desc = SortState::parse("name", "desc");
    assert!(grid
        .sort(&header, &desc)
        .as_str()
        .contains("icon-arrow-down-3"));
    assert!(sort_action(&header, &desc).to_js().contains("'asc'"));
}

#[test]
fn sort_header_targets_an_explicit_form() {
    let state = SortState::new("name", SortDirection::Asc);
    let header = SortHeader::new("JSTATUS", "status").form("filterForm");
    assert_eq!(
        sort_action(&header, &state).to_js(),
        "Joomla.tableOrdering('status','asc','',document.getElementById('filterForm'))"
    );
}

#[test]
fn sort_header_registers_script_behaviors_once() {
    let lang = catalog();
    let behaviors = BehaviorRegistry::new();
    let grid = GridHelper::new(&lang, &behaviors);
    let header = SortHeader::new("JSTATUS", "status");
    let state = SortState::new("name", SortDirection::Asc);

    let first = grid.sort(&header, &state);
    let second = grid.sort(&header, &state);

    assert_eq!(first, second);
    assert_eq!(behaviors.loaded(), vec![BEHAVIOR_CORE, BEHAVIOR_POPOVER]);
}

#[test]
fn checked_out_row_checkbox_is_empty() {
    let lang = catalog();
    let behaviors = BehaviorRegistry::new();
    let grid = GridHelper::new(&lang, &behaviors);

    let html = grid.id(&RowCheckbox::new(3, 42).checked_out(true));
    assert!(html.is_empty());
    assert_eq!(html.as_str(), "");
}

#[test]
fn row_checkbox_carries_record_id_and_array_name() {
    let lang = catalog();
    let behaviors = BehaviorRegistry::new();
    let grid = GridHelper::new(&lang, &behaviors);

    let html = grid.id(&RowCheckbox::new(3, 42).label("Articles"));
    let html = html.as_str();
    assert!(html.contains(r#"value="42""#));
    assert!(html.contains(r#"name="cid[]""#));
    assert!(html.contains(r#"id="cb3""#));
    assert!(html.contains("Select Articles"));
    assert!(html.contains(r#"onclick="Joomla.isChecked(this.checked);""#));

    let custom = grid.id(&RowCheckbox::new(0, 7).name("ids").stub("row"));
    assert!(custom.as_str().contains(r#"name="ids[]""#));
    assert!(custom.as_str().contains(r#"id="row0""#));
}

#[test]
fn state_options_without_extra_labels_are_blank_published_unpublished() {
    let lang = catalog();
    let behaviors = BehaviorRegistry::new();
    let grid = GridHelper::new(&lang, &behaviors);

    let keys: Vec<&str> = grid
        .state_options(&StateFilter::default())
        .into_iter()
        .map(|(value, _)| value)
        .collect();
    assert_eq!(keys, ["", "P", "U"]);
}

#[test]
fn state_options_with_archived_and_trashed_append_in_order() {
    let lang = catalog();
    let behaviors = BehaviorRegistry::new();
    let grid = GridHelper::new(&lang, &behaviors);

    let filter = StateFilter::new("T").archived("JARCHIVED").trashed("JTRASHED");
    let options = grid.state_options(&filter);
    let keys: Vec<&str> = options.iter().map(|(value, _)| *value).collect();
    assert_eq!(keys, ["", "P", "U", "A", "T"]);
    assert_eq!(options[3].1, "Archived");

    let html = grid.state(&filter);
    assert!(html
        .as_str()
        .contains(r#"<option value="T" selected>Trashed</option>"#));
    assert!(html.as_str().contains(r#"onchange="Joomla.submitform();""#));
}

#[test]
fn empty_archived_label_is_skipped() {
    let lang = catalog();
    let behaviors = BehaviorRegistry::new();
    let grid = GridHelper::new(&lang, &behaviors);

    let filter = StateFilter::default().archived("").trashed("JTRASHED");
    let keys: Vec<&str> = grid
        .state_options(&filter)
        .into_iter()
        .map(|(value, _)| value)
        .collect();
    assert_eq!(keys, ["", "P", "U", "T"]);
}

#[test]
fn publish_toggle_targets_the_opposite_task() {
    assert_eq!(
        publish_action(true, 2, "cb", "articles.").to_js(),
        "Joomla.listItemTask('cb2','articles.unpublish')"
    );
    assert_eq!(
        publish_action(false, 2, "cb", "").to_js(),
        "Joomla.listItemTask('cb2','publish')"
    );

    let lang = catalog();
    let behaviors = BehaviorRegistry::new();
    let grid = GridHelper::new(&lang, &behaviors);
    let on = grid.published(PublishState::from(true), 0, "manage.");
    assert!(on.as_str().contains("manage.unpublish"));
    assert!(on.as_str().contains("tick.png"));
    let off = grid.published(PublishState::Flag(false), 0, "manage.");
    assert!(off.as_str().contains("manage.publish"));
    assert!(off.as_str().contains("publish_x.png"));
}

#[test]
fn order_handle_passes_last_row_index() {
    let lang = catalog();
    let behaviors = BehaviorRegistry::new();
    let grid = GridHelper::new(&lang, &behaviors);

    let rows = ["a", "b", "c", "d"];
    let html = grid.order(&rows, None);
    assert!(html
        .as_str()
        .contains(r#"href="javascript:saveorder(3,'saveorder')""#));

    let empty: [u8; 0] = [];
    assert!(grid
        .order(&empty, Some("items.saveorder"))
        .as_str()
        .contains("saveorder(-1,'items.saveorder')"));
}

#[test]
fn helpers_are_pure_for_identical_inputs() {
    let lang = catalog();
    let behaviors = BehaviorRegistry::new();
    let grid = GridHelper::new(&lang, &behaviors);

    let filter = StateFilter::new("P");
    assert_eq!(grid.state(&filter), grid.state(&filter));
    assert_eq!(grid.check_all(), grid.check_all());
    assert_eq!(
        grid.id(&RowCheckbox::new(1, 9)),
        grid.id(&RowCheckbox::new(1, 9))
    );
    assert_eq!(behaviors.loaded(), vec![BEHAVIOR_CORE]);
}

#[test]
fn translated_text_is_escaped_but_markup_titles_pass_through() {
    let mut lang = catalog();
    lang.insert("X_TITLE", "Size <b> & \"weight\"");
    let behaviors = BehaviorRegistry::new();
    let grid = GridHelper::new(&lang, &behaviors);
    let state = SortState::new("name", SortDirection::Asc);

    let escaped = grid.sort(&SortHeader::new("X_TITLE", "size"), &state);
    assert!(escaped
        .as_str()
        .contains(">Size &lt;b&gt; &amp; &quot;weight&quot;<"));

    let raw = grid.sort(&SortHeader::new("<em>Hits</em>", "hits"), &state);
    assert!(raw.as_str().contains("><em>Hits</em></a>"));
}

#[test]
fn js_arguments_are_quoted_safely() {
    let state = SortState::new("name", SortDirection::Asc);
    let header = SortHeader::new("JSTATUS", "it's");
    let js = sort_action(&header, &state).to_js();
    assert!(js.starts_with(r"Joomla.tableOrdering('it\'s'"));
}
