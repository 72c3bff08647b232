//! docklint CLI tool.
//!
//! Usage:
//! ```bash
//! docklint check [OPTIONS] [FILE]...
//! docklint list-rules
//! docklint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod settings;

/// Static analysis for Dockerfile-like build recipes
#[derive(Parser)]
#[command(name = "docklint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint build recipes
    Check {
        /// Files to analyze
        #[arg(default_value = "Dockerfile")]
        files: Vec<PathBuf>,

        /// Disable colored output even on a terminal (also set by a non-empty `NO_COLOR`)
        #[arg(long)]
        no_color: bool,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check { files, no_color } => {
            let settings = settings::load(Path::new("."), cli.config.as_deref(), no_color)?;
            commands::check::run(&files, &settings)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
