use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use vitrine_export::Config;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "vitrine", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the archive database (default: ~/.local/share/vitrine/vitrine.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Export all items of one type to a CSV file
    ///
    /// Runs the flat-file report over the archive database. For the selected
    /// item type:
    ///
    /// - Every item's metadata element names are collected first, so the
    ///   output header is the complete, sorted union of fields plus the
    ///   fixed Identifier, Files, and Tags columns
    /// - One row is then written per item, with tags, filenames, and
    ///   multi-valued metadata fields joined with '|'
    /// - Fields an item has no value for come out as empty cells
    ///
    /// The run is all-or-nothing: a store or write failure aborts the whole
    /// export, and the job can simply be re-run from scratch.
    ///
    /// The item type and output path default to the configured values; see
    /// 'vitrine config'.
    Export {
        /// Numeric id of the item type to export
        #[arg(long)]
        type_id: Option<i64>,

        /// Output CSV path
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Show item types and counts in the archive
    Status,
    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match cli.db {
        Some(db_path) => Config::load_with_db_path(db_path)?,
        None => Config::load()?,
    };
    log::debug!("using database {}", config.database_path.display());

    match cli.command {
        Commands::Export { type_id, output } => {
            commands::run_export(&config, type_id, output)?;
        }
        Commands::Status => {
            commands::show_status(&config)?;
        }
        Commands::Config { init } => {
            commands::show_config(&config, init)?;
        }
    }

    Ok(())
}
