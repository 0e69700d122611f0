//! Techjobs CLI - query a CSV table of job listings from the command line.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use techjobs::config::DATA_FILE_ENV;
use techjobs::{Config, JobStore};
use tracing_subscriber::EnvFilter;

mod cli;

/// Techjobs: list and search job listings loaded from a CSV file.
#[derive(Parser)]
#[command(name = "techjobs")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// CSV file with job listings (overrides the config file)
    #[arg(short, long, global = true, env = DATA_FILE_ENV)]
    data: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the distinct values of a field
    List {
        /// Field name, exactly as it appears in the header (e.g. "employer")
        field: String,
    },

    /// Show every job
    All,

    /// Search jobs for a term (case-insensitive substring match)
    Search {
        /// Search term; an empty term matches every job
        term: String,

        /// Only search this field instead of every field
        #[arg(short = 'f', long = "field")]
        column: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = resolve_config(cli.data, cli.config.as_deref()).and_then(|config| {
        let store = JobStore::from_config(&config);
        tracing::debug!(source = %store.source(), "resolved data source");

        match cli.command {
            Commands::List { field } => cli::list::run(&store, &field, cli.json),
            Commands::All => cli::all::run(&store, cli.json),
            Commands::Search { term, column } => {
                cli::search::run(&store, &term, column.as_deref(), cli.json)
            }
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}

/// Pick the data file: `--data` (or its env var) wins over the config file,
/// which wins over the built-in default.
fn resolve_config(
    data: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<Config, techjobs::Error> {
    let config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    Ok(match data {
        Some(path) => Config::with_data_file(path),
        None => config,
    })
}
