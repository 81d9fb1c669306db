//! Main CLI application structure

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::output::{Output, OutputFormat};
use super::{task, tui};
use crate::storage::Profile;

#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about = "Local-first personal to-do list")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Directory holding tasks and configuration
    #[arg(long, global = true, env = "POCKET_TODO_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Task(task::TaskCommands),

    /// Open the interactive terminal UI
    Ui,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format);

    let data_dir = Profile::resolve_dir(cli.data_dir.as_deref())?;
    let profile = Profile::open(&data_dir)?;

    match cli.command {
        Commands::Task(cmd) => {
            init_tracing(cli.verbose, None)?;
            tracing::debug!(data_dir = %profile.dir().display(), "running command");
            task::run(cmd, &profile, &output)?
        }
        Commands::Ui => {
            // Log lines on stderr would tear the alternate screen
            init_tracing(cli.verbose, Some(&profile.log_path()))?;
            tracing::debug!(data_dir = %profile.dir().display(), "starting terminal UI");
            tui::run(&profile)?
        }
    }

    tracing::debug!("command completed");
    Ok(())
}

/// Installs the global subscriber
///
/// `RUST_LOG` wins when it holds a valid filter; otherwise warnings only, or
/// debug output for this crate with `--verbose`.
fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| {
            if verbose {
                EnvFilter::new("warn,pocket_todo=debug")
            } else {
                EnvFilter::new("warn")
            }
        });

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;

            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .with(filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    }

    Ok(())
}
