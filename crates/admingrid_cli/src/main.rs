//! Command-line renderer for the extension manager list.
//!
//! Opens (or seeds) an extension catalog, optionally runs a list task, and
//! prints the behavior script tags followed by the rendered list form.
//! `--page setup` prints the installation wizard setup page instead.

use admingrid_core::db::Connection;
use admingrid_core::repo::extension_repo::ExtensionRepository;
use admingrid_core::{
    default_log_level, init_logging, init_stderr_logging, open_db, open_db_in_memory,
    BehaviorRegistry, ChronoDateFormatter, ClientLocation, Extension, ExtensionListQuery,
    ExtensionOrdering, ExtensionType, GridConfig, GridHelper, LanguageCatalog, ManageService,
    ManageView, MediaImageResolver, SetupForm, SetupView, SortDirection,
    SqliteExtensionRepository, SqliteUserRepository, Viewer,
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Page {
    /// Extension manager list
    Manage,
    /// Installation wizard setup page
    Setup,
}

#[derive(Parser, Debug)]
#[command(name = "admingrid")]
#[command(version)]
#[command(about = "Render the extension manager list as HTML")]
struct Args {
    /// Page to render
    #[arg(long, value_enum, default_value_t = Page::Manage)]
    page: Page,

    /// Name of the anti-forgery field on the setup forms
    #[arg(long, default_value = "csrf-token")]
    token: String,

    /// SQLite catalog file; an in-memory demo catalog is used when omitted
    #[arg(long)]
    db: Option<String>,

    /// Insert the demo extensions into the catalog before rendering
    #[arg(long)]
    seed: bool,

    /// Order key (name, status, client_translated, type_translated, ...)
    #[arg(long, default_value = "name")]
    order: String,

    /// Order direction (asc or desc)
    #[arg(long, default_value = "asc")]
    dir: String,

    /// State filter: P (enabled), U (disabled), empty for all
    #[arg(long, default_value = "")]
    state: String,

    /// Name substring, or id:<n>
    #[arg(long)]
    search: Option<String>,

    /// Rows per page; 0 lists everything (defaults to the config value)
    #[arg(long)]
    limit: Option<u32>,

    /// Offset of the first row
    #[arg(long, default_value_t = 0)]
    limitstart: u32,

    /// List task to run first (manage.publish, manage.unpublish, manage.checkin)
    #[arg(long)]
    task: Option<String>,

    /// Comma-separated extension ids the task applies to
    #[arg(long, value_delimiter = ',')]
    ids: Vec<i64>,

    /// Id of the user the page is rendered for
    #[arg(long, default_value_t = 1)]
    viewer: i64,

    /// JSON language file merged over the built-in en-GB strings
    #[arg(long)]
    lang: Option<String>,

    /// JSON grid configuration file
    #[arg(long)]
    config: Option<String>,

    /// Timezone offset in seconds east of UTC for lock times
    #[arg(long, default_value_t = 0)]
    utc_offset: i32,

    /// Absolute directory for rolling log files; logs go to stderr otherwise
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    let logging = match args.log_dir.as_deref() {
        Some(dir) => init_logging(&level, dir),
        None => init_stderr_logging(&level),
    };
    logging
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    let config = match args.config.as_deref() {
        Some(path) => {
            GridConfig::load(path).with_context(|| format!("failed to load config `{path}`"))?
        }
        None => GridConfig::default(),
    };
    config.validate().context("invalid grid configuration")?;

    let mut catalog = LanguageCatalog::en_gb();
    if let Some(path) = args.lang.as_deref() {
        let merged = catalog
            .merge_file(path)
            .with_context(|| format!("failed to load language file `{path}`"))?;
        info!("event=lang_merge module=cli status=ok path={path} strings={merged}");
    }

    if args.page == Page::Setup {
        let body = SetupView::new(&catalog).render(&SetupForm::default(), &args.token);
        println!("{body}");
        info!("event=cli_render module=cli status=ok page=setup");
        return Ok(());
    }

    let conn = match args.db.as_deref() {
        Some(path) => open_db(path).with_context(|| format!("failed to open catalog `{path}`"))?,
        None => open_db_in_memory().context("failed to open in-memory catalog")?,
    };
    if args.seed || args.db.is_none() {
        seed_demo_catalog(&conn).context("failed to seed demo catalog")?;
    }

    let service = ManageService::new(SqliteExtensionRepository::new(&conn));
    if let Some(task) = args.task.as_deref() {
        let affected = service
            .run_task(task, &args.ids)
            .with_context(|| format!("task `{task}` failed"))?;
        info!("event=cli_task module=cli status=ok task={task} affected={affected}");
    }

    let query = ExtensionListQuery {
        ordering: ExtensionOrdering::parse(&args.order),
        direction: SortDirection::parse(&args.dir),
        enabled: match args.state.trim() {
            "P" => Some(true),
            "U" => Some(false),
            _ => None,
        },
        search: args.search.clone(),
        limit: Some(args.limit.unwrap_or(config.list_limit)),
        offset: args.limitstart,
        ..ExtensionListQuery::default()
    };
    let page = service.list_page(&query).context("failed to load extensions")?;

    let dates = ChronoDateFormatter::with_offset_seconds(args.utc_offset)
        .with_context(|| format!("utc offset out of range: {}", args.utc_offset))?;
    let images = MediaImageResolver::new(config.media_base_url.as_str());
    let behaviors = BehaviorRegistry::new();
    let grid = GridHelper::new(&catalog, &behaviors)
        .with_images(&images)
        .with_dates(&dates)
        .with_config(&config);
    let view = ManageView::new(grid, Viewer::new(args.viewer));

    let body = view.render(
        &page,
        &query,
        "index.php?option=com_installer&view=manage",
    );
    println!("{}", behaviors.script_tags(&config.media_base_url));
    println!("{body}");

    info!(
        "event=cli_render module=cli status=ok rows={} total={}",
        page.items.len(),
        page.total
    );
    Ok(())
}

fn seed_demo_catalog(conn: &Connection) -> Result<()> {
    let users = SqliteUserRepository::new(conn);
    let admin = users.create_user("Super User")?;
    let editor = users.create_user("Jane Editor")?;

    let repo = SqliteExtensionRepository::new(conn);

    let mut content = Extension::new("com_content", ExtensionType::Component, "com_content");
    content.client = ClientLocation::Administrator;
    content.protected = true;
    content.version = "4.0.0".to_string();
    content.creation_date = "April 2006".to_string();
    content.author = "Joomla! Project".to_string();
    content.description = "Article manager".to_string();
    repo.create_extension(&content)?;

    let mut login = Extension::new("Login", ExtensionType::Module, "mod_login");
    login.version = "4.0.0".to_string();
    login.author = "Joomla! Project".to_string();
    login.description = "Displays a login form".to_string();
    login.changelog_url = Some("https://example.org/changelog/mod_login.xml".to_string());
    login.checked_out = editor;
    login.checked_out_time = Some(1_552_554_300_000);
    repo.create_extension(&login)?;

    let mut vote = Extension::new("Content - Vote", ExtensionType::Plugin, "vote");
    vote.folder = "content".to_string();
    vote.enabled = false;
    vote.version = "3.9.0".to_string();
    repo.create_extension(&vote)?;

    let mut package = Extension::new("Demo Package", ExtensionType::Package, "pkg_demo");
    package.version = "1.2.0".to_string();
    let package_id = repo.create_extension(&package)?;

    let mut bundled = Extension::new("Demo Template", ExtensionType::Template, "demo");
    bundled.package_id = package_id;
    bundled.checked_out = admin;
    bundled.checked_out_time = Some(1_552_554_300_000);
    repo.create_extension(&bundled)?;

    let missing = Extension::new("Orphaned Library", ExtensionType::Library, "");
    repo.create_extension(&missing)?;

    info!("event=seed_demo module=cli status=ok extensions=6 users=2");
    Ok(())
}
