//! archguard CLI tool.
//!
//! Usage:
//! ```bash
//! archguard check [--root PATH] [--config PATH]
//! archguard matrix <SCOPE>
//! archguard stats <SCOPE>
//! archguard tree [--exclude DIR]...
//! archguard init
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod root_discovery;

/// Architecture linter for Rust projects.
#[derive(Parser)]
#[command(name = "archguard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root (default: discovered automatically).
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the project's package graph against the configured policy.
    Check,

    /// Render the Markdown dependency matrix for a package scope.
    Matrix {
        /// Package path to scope the table to.
        scope: String,
    },

    /// Render the per-package statistics report for a package scope.
    Stats {
        /// Package path to scope the report to.
        scope: String,
    },

    /// Render an ASCII directory tree annotated with resolved roles.
    Tree {
        /// Directory names to exclude (repeatable).
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Write a starter configuration file.
    Init {
        /// Overwrite an existing config file.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Commands::Init { force } = cli.command {
        return commands::init::run(force);
    }

    let cwd = std::env::current_dir().context("failed to read current directory")?;

    let config_source = config_resolver::resolve(&cwd, cli.config.as_deref());
    if config_source.is_global() {
        if let Some(p) = config_source.path() {
            tracing::info!("using global config: {}", p.display());
        }
    }

    let root = root_discovery::discover(
        cli.root.as_deref(),
        &cwd,
        config_source.path().and_then(std::path::Path::parent),
    );

    let cfg = match config_source.path() {
        Some(p) => arch_guard_core::Configuration::from_toml_file(p)
            .with_context(|| format!("failed to load configuration: {}", p.display()))?,
        None => arch_guard_core::Configuration::default_config(),
    };

    tracing::info!(root = %root.display(), "analyzing project");

    match cli.command {
        Commands::Check => commands::check::run(&root, &cfg),
        Commands::Matrix { scope } => commands::matrix::run(&root, &cfg, &scope),
        Commands::Stats { scope } => commands::stats::run(&root, &cfg, &scope),
        Commands::Tree { exclude } => commands::tree::run(&root, &cfg, &exclude),
        Commands::Init { .. } => unreachable!("handled above"),
    }
}
