// src/main.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pollster::block_on;
use tracing::{debug, error, info};

use mht_core::{CategoryKey, GuidelineLibrary};
use mht_layout::{LayoutController, LayoutState, MetricsWatcher, PaneLayoutEngine, ScreenMetrics};
use mht_runtime::{
    BookmarkRepository, BookmarkScope, DecisionSession, GuidelinesScreen, JsonFileStore,
    RuntimeConfig, TracingNavigator, DEFAULT_STORE_PATH,
};

mod render;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScopeArg {
    /// Combined traditional and evidence-based guidelines screen
    Combined,
    /// Professional guidelines screen
    Professional,
}

impl From<ScopeArg> for BookmarkScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Combined => BookmarkScope::Combined,
            ScopeArg::Professional => BookmarkScope::Professional,
        }
    }
}

#[derive(Parser)]
#[command(name = "mht-guide")]
#[command(about = "Menopausal hormone therapy guideline reference")]
struct Args {
    /// File holding persisted bookmarks
    #[arg(long, global = true, default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    /// Which screen's bookmark list to use
    #[arg(long, global = true, value_enum, default_value_t = ScopeArg::Combined)]
    scope: ScopeArg,

    /// Screen width in logical pixels
    #[arg(long, global = true, default_value_t = 390.0)]
    width: f32,

    /// Screen height in logical pixels
    #[arg(long, global = true, default_value_t = 844.0)]
    height: f32,

    /// Never split into list and detail panes
    #[arg(long, global = true)]
    single_pane: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the layout chosen for the screen size
    Layout {
        /// Also show the layout after rotating the screen
        #[arg(long)]
        rotate: bool,
    },

    /// List guidelines, optionally filtered
    List {
        /// all, legacy, comprehensive, critical, important or tools
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Case-insensitive text search
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only bookmarked guidelines
        #[arg(long)]
        bookmarked: bool,
    },

    /// Show a single guideline
    Show { id: String },

    /// Add or remove a bookmark
    Bookmark { id: String },

    /// Walk the decision tree attached to a guideline
    Tree {
        id: String,

        /// Options to pick in order, 1-based (e.g. 1,2)
        #[arg(short, long, value_delimiter = ',')]
        choose: Vec<usize>,

        /// Dismiss a final outcome instead of leaving it pending
        #[arg(long)]
        acknowledge: bool,

        /// Return to the first question after the walk
        #[arg(long)]
        start_over: bool,
    },

    /// Check the bundled guideline and decision tree data
    Validate,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug)?;

    let config = RuntimeConfig {
        store_path: args.store.clone(),
        scope: args.scope.into(),
        metrics: ScreenMetrics::new(args.width, args.height),
        enable_multi_pane: !args.single_pane,
    };
    debug!("Runtime config: {:?}", config);

    let library = Arc::new(GuidelineLibrary::builtin().context("Failed to load guideline data")?);

    match args.command {
        Command::Layout { rotate } => show_layout(&config, rotate),
        Command::List {
            category,
            search,
            bookmarked,
        } => {
            let mut screen = open_screen(&config, library);
            block_on(screen.mount());
            list_guidelines(&mut screen, &category, &search, bookmarked);
            Ok(())
        }
        Command::Show { id } => {
            let mut screen = open_screen(&config, library);
            block_on(screen.mount());
            let bookmarked = screen.is_bookmarked(&id);
            let record = screen
                .select_guideline(&id)
                .with_context(|| format!("Unknown guideline: {id}"))?;
            print!("{}", render::guideline_detail(record, bookmarked));
            Ok(())
        }
        Command::Bookmark { id } => {
            let mut screen = open_screen(&config, library);
            block_on(screen.mount());
            if screen.library().get(&id).is_none() {
                anyhow::bail!("Unknown guideline: {id}");
            }
            if block_on(screen.toggle_bookmark(&id)) {
                println!("Bookmarked {id}");
            } else {
                println!("Removed bookmark {id}");
            }
            Ok(())
        }
        Command::Tree {
            id,
            choose,
            acknowledge,
            start_over,
        } => {
            let mut screen = open_screen(&config, library.clone());
            screen
                .start_decision_tree(&id)
                .with_context(|| format!("Cannot open decision tree for {id}"))?;
            walk_tree(&library, &id, &choose, acknowledge, start_over)
        }
        Command::Validate => validate(&library),
    }
}

fn init_logging(debug: bool) -> Result<()> {
    let level = if debug { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")
}

fn open_screen(
    config: &RuntimeConfig,
    library: Arc<GuidelineLibrary>,
) -> GuidelinesScreen<JsonFileStore, TracingNavigator> {
    let repository = BookmarkRepository::new(JsonFileStore::new(&config.store_path), config.scope);
    GuidelinesScreen::new(library, repository, TracingNavigator::new(), config.layout_state())
}

fn show_layout(config: &RuntimeConfig, rotate: bool) -> Result<()> {
    let watcher = MetricsWatcher::new(config.metrics);
    let controller = LayoutController::attach(&watcher, config.enable_multi_pane);
    let mut engine = PaneLayoutEngine::new();

    print_layout(&mut engine, config, &controller.state())?;

    if rotate {
        let current = watcher.current();
        watcher.update(ScreenMetrics::new(current.height, current.width));
        println!();
        print_layout(&mut engine, config, &controller.state())?;
    }
    Ok(())
}

fn print_layout(engine: &mut PaneLayoutEngine, config: &RuntimeConfig, state: &LayoutState) -> Result<()> {
    let panes = engine
        .compute(state.device.metrics, &config.pane_config())
        .context("Failed to compute pane layout")?;
    print!("{}", render::layout_report(state, &panes));
    Ok(())
}

fn list_guidelines(
    screen: &mut GuidelinesScreen<JsonFileStore, TracingNavigator>,
    category: &str,
    search: &str,
    bookmarked: bool,
) {
    let key = CategoryKey::parse(category);
    screen.set_category(key);
    screen.set_query(search);

    print!("{}", render::category_bar(&screen.counts(), key));

    if bookmarked {
        let records = screen.visible_bookmarked_records();
        println!("{} of {} bookmarked", records.len(), screen.bookmarks().len());
        let empty = if screen.bookmarks().is_empty() {
            render::NO_BOOKMARKS_MESSAGE
        } else {
            render::EMPTY_LIST_MESSAGE
        };
        let rows = mht_layout::pack_into_rows(records, screen.layout().columns);
        print!("{}", render::guideline_grid(&rows, screen.bookmarks(), empty));
        return;
    }

    let rows = screen.grid_rows();
    let shown: usize = rows.iter().map(|row| row.items().count()).sum();
    println!("{} of {} guidelines", shown, screen.library().records().len());
    print!(
        "{}",
        render::guideline_grid(&rows, screen.bookmarks(), render::EMPTY_LIST_MESSAGE)
    );
}

fn walk_tree(
    library: &GuidelineLibrary,
    id: &str,
    choices: &[usize],
    acknowledge: bool,
    start_over: bool,
) -> Result<()> {
    let (tree, root) = library
        .decision_root(id)
        .with_context(|| format!("Guideline {id} has no decision tree"))?;
    let mut session = DecisionSession::start(library.trees(), tree, &root.id)?;

    for &choice in choices {
        let Some(index) = choice.checked_sub(1) else {
            error!("Could not apply option 0: option numbers start at 1");
            break;
        };
        // Unknown targets and bad indices leave the session where it was.
        if let Err(err) = session.choose(index) {
            error!("Could not apply option {}: {}", choice, err);
            break;
        }
    }

    if acknowledge {
        if let Some(outcome) = session.acknowledge() {
            info!("Acknowledged outcome: {}", outcome.text);
            print!("{}", render::outcome_view(&outcome));
        }
    }

    if start_over {
        session.start_over();
    }

    print!("{}", render::session_view(&session));
    Ok(())
}

fn validate(library: &GuidelineLibrary) -> Result<()> {
    let counts = library.counts();
    print!("{}", render::category_bar(&counts, CategoryKey::All));

    for tree in library.trees().trees() {
        println!("Tree {}: {} nodes", tree.key, tree.nodes.len());
    }

    for record in library.records() {
        if let Some(entry) = &record.decision_tree {
            println!(
                "{} -> {}/{} (longest path {})",
                record.id,
                entry.tree,
                entry.root,
                library.trees().longest_path(&entry.tree, &entry.root)
            );
        }
    }

    let dangling = library.trees().dangling_references();
    if !dangling.is_empty() {
        for reference in &dangling {
            println!("Dangling: {}/{} -> {}", reference.tree, reference.node, reference.missing);
        }
        anyhow::bail!("{} decision option(s) point at missing nodes", dangling.len());
    }

    println!("OK");
    Ok(())
}
