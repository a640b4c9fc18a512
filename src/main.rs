// OrderDesk - main.rs
//
// Console entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading and logging initialisation
// 3. Listing view loading (built-in + user-defined)
// 4. Subcommand dispatch

mod render;

use clap::{Parser, Subcommand};
use orderdesk::app::{dataset_mgr, query, view_mgr};
use orderdesk::platform;
use orderdesk::util;
use orderdesk::util::error::Result;
use std::path::{Path, PathBuf};

/// OrderDesk - order, shipping and delivery listing console.
///
/// Runs the console's listing screens from the command line: filter a
/// record snapshot through a view's search and dropdown configuration
/// and print the rows with their status summary.
#[derive(Parser, Debug)]
#[command(name = "orderdesk", version, about)]
struct Cli {
    /// Additional directory containing user-defined view definitions.
    #[arg(long = "views-dir", global = true)]
    views_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available listing views.
    Views,

    /// Run a listing: filter its records and print the table.
    List {
        /// View id (see `orderdesk views`).
        view: String,

        /// Dataset JSON file (defaults to the view's sample data).
        #[arg(long)]
        data: Option<PathBuf>,

        /// Free-text search term (case-insensitive substring).
        #[arg(short, long)]
        search: Option<String>,

        /// Categorical selection, repeatable (e.g. --select status=配送中).
        #[arg(long = "select", value_name = "FIELD=VALUE")]
        select: Vec<String>,

        /// Suppress the status summary counts.
        #[arg(long)]
        no_summary: bool,

        /// Print at most this many rows (0 = all).
        #[arg(long, default_value_t = 0)]
        limit: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load config before logging init so the
    // configured level can apply; config warnings are logged after.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    for warning in &config_warnings {
        tracing::warn!(error = %warning, "Configuration warning");
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "OrderDesk starting"
    );

    // Determine user views directory: CLI override > config > platform default
    let user_views_dir: &Path = cli
        .views_dir
        .as_deref()
        .or(config.user_views_dir.as_deref())
        .unwrap_or(&platform_paths.user_views_dir);

    let (views, view_errors) = view_mgr::load_all_views(Some(user_views_dir));
    for err in &view_errors {
        tracing::warn!(error = %err, "View loading warning");
    }

    if let Err(e) = run(&cli.command, &views, config.max_records) {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(
    command: &Command,
    views: &[orderdesk::core::model::ListingView],
    max_records: usize,
) -> Result<()> {
    match command {
        Command::Views => {
            print!("{}", render::render_views(views));
            Ok(())
        }
        Command::List {
            view,
            data,
            search,
            select,
            no_summary,
            limit,
        } => {
            let view = view_mgr::find_view(views, view)?;

            let selections = select
                .iter()
                .map(|arg| query::parse_selection(arg))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            let criteria = query::build_criteria(view, search.as_deref(), &selections)?;

            let records = dataset_mgr::load_for_view(view, data.as_deref(), max_records)?;

            let mut outcome = query::run(view, &records, &criteria);
            if *no_summary {
                outcome.summary = None;
            }

            print!("{}", render::render_listing(view, &outcome, *limit));
            Ok(())
        }
    }
}
