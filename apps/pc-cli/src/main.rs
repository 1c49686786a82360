//! # pc-cli
//!
//! Command-line front end for Project Console notifications.
//!
//! - `pc run <script>` — drive one notification session from a command script
//! - `pc shortcuts` — print the keyboard shortcut help table

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pc_notify::ConsoleConfig;
use tracing_subscriber::EnvFilter;

/// Project Console — notifications and shortcuts from the terminal.
#[derive(Parser)]
#[command(name = "pc", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Config file (defaults to <project-root>/.pc/console.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a session script against a fresh notification store.
    Run {
        /// Script file, one command per line ("-" reads stdin).
        script: PathBuf,
    },
    /// Show keyboard shortcuts.
    Shortcuts,
}

fn main() -> anyhow::Result<()> {
    // Logs and toasts go to stderr; stdout carries command output only.
    // RUST_LOG replaces the defaults entirely. The binary logs under `pc`.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pc_notify=info,pc_shortcuts=info,pc=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config_path = cli
        .config
        .unwrap_or_else(|| ConsoleConfig::path_for_project(&project_root));
    let config = ConsoleConfig::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    tracing::debug!("project root: {}", project_root.display());

    match &cli.command {
        Commands::Run { script } => commands::run::execute(script, &config, &project_root),
        Commands::Shortcuts => commands::shortcuts::execute(),
    }
}
