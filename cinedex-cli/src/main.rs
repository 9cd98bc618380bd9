//! cinedex CLI
//!
//! Command-line interface for browsing a film catalog database read-only.

mod commands;
mod error;
mod settings;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

pub(crate) use error::CliError;

use commands::config::{run_config_clear_db, run_config_path, run_config_set_db, run_config_show};
use commands::{check::run_check, entry::run_entry, item::run_item, kinds::run_kinds, list::run_list};

#[derive(Parser)]
#[command(name = "cinedex")]
#[command(about = "Browse a film catalog database", long_about = None)]
struct Cli {
    /// Catalog database file (defaults to the configured path, then ./cinedex.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Retrieve one entry by table and ID
    Entry {
        /// Entry table (e.g., Movie, Country, Genre)
        kind: String,

        /// Entry ID
        id: String,

        /// Skip the entry's collections
        #[arg(long)]
        basic_only: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Retrieve one association item by base, target and ID
    Item {
        /// Base table (e.g., Movie)
        base: String,

        /// Target table (e.g., Country)
        target: String,

        /// Item ID
        id: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the items linking one base entry to a target table
    List {
        /// Base table (e.g., Series)
        base: String,

        /// ID of the base entry
        base_id: String,

        /// Target table (e.g., Genre)
        target: String,

        /// Column to order by (default: ID)
        #[arg(long)]
        order: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the built-in entry and item kinds
    Kinds,

    /// Compare the database schema against the built-in kinds
    Check,

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the settings file path
    Path,

    /// Show the settings file and the resolved database path
    Show,

    /// Save the default database path
    SetDb {
        /// Path to the catalog database
        path: PathBuf,
    },

    /// Remove the saved database path
    ClearDb,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let db = cli.db;
    let result = match cli.command {
        Commands::Entry {
            kind,
            id,
            basic_only,
            json,
        } => run_entry(db, &kind, &id, basic_only, json),
        Commands::Item {
            base,
            target,
            id,
            json,
        } => run_item(db, &base, &target, &id, json),
        Commands::List {
            base,
            base_id,
            target,
            order,
            json,
        } => run_list(db, &base, &base_id, &target, order.as_deref(), json),
        Commands::Kinds => {
            run_kinds();
            Ok(())
        }
        Commands::Check => run_check(db),
        Commands::Config { action } => match action {
            ConfigAction::Path => {
                run_config_path();
                Ok(())
            }
            ConfigAction::Show => {
                run_config_show(db);
                Ok(())
            }
            ConfigAction::SetDb { path } => run_config_set_db(&path),
            ConfigAction::ClearDb => run_config_clear_db(),
        },
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

/// All output goes through the logger on stdout: plain messages for `info`,
/// a colored level prefix for everything else. `RUST_LOG` overrides the level
/// picked from `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stdout, |t| t.red()),
                record.args()
            ),
            Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stdout, |t| t.yellow()),
                record.args()
            ),
            other => writeln!(
                buf,
                "{} {}",
                format!("[{}]", other.as_str().to_lowercase())
                    .if_supports_color(Stdout, |t| t.dimmed()),
                record.args()
            ),
        })
        .init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
