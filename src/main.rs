mod catalog;
mod commands;
mod config;
mod ui;

use anyhow::{Context, Result};
use catalog::CatalogFile;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// catview - Browse installations and versions from the terminal
#[derive(Parser)]
#[command(name = "catview")]
#[command(version = "0.1.0")]
#[command(about = "Browse installations and installable versions", long_about = None)]
struct Cli {
    /// Catalog file to read (defaults to <data dir>/catview/catalog.json)
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive installations page
    #[command(alias = "b")]
    Browse,

    /// List installations
    #[command(alias = "i")]
    Installations,

    /// List versions that can be installed
    #[command(alias = "v")]
    Versions {
        /// Search query
        query: Option<String>,

        /// Show every version, installed ones included
        #[arg(short, long)]
        all: bool,
    },

    /// Show or change the color theme
    Theme {
        /// Theme to switch to
        name: Option<String>,
    },
}

fn main() {
    let _guard = init_logging();

    if let Err(e) = run() {
        tracing::error!("{e:#}");
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Log to a daily file; the terminal belongs to the TUI
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = dirs::data_dir()?.join("catview").join("logs");
    std::fs::create_dir_all(&logs_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "catview.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    Some(guard)
}

fn load_catalog(path: Option<&Path>) -> Result<CatalogFile> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => CatalogFile::default_path()
            .context("Could not find data directory, pass --catalog <PATH>")?,
    };
    Ok(CatalogFile::load(&path)?)
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load_settings();

    match cli.command {
        Some(Commands::Installations) => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            commands::InstallationsCommand::execute(&catalog)?;
        }
        Some(Commands::Versions { query, all }) => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            commands::VersionsCommand::execute(&catalog, query, all, settings.match_mode)?;
        }
        Some(Commands::Theme { name }) => {
            commands::ThemeCommand::execute(name)?;
        }
        Some(Commands::Browse) | None => {
            // No command provided - open the interactive page
            let catalog = load_catalog(cli.catalog.as_deref())?;
            ui::Runner::run(&catalog, &settings)?;
        }
    }

    Ok(())
}
