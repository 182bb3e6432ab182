//! hive CLI - static personal site and blog generator.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "hive")]
#[command(about = "Static personal site and blog generator")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to site.toml config file
    #[arg(short, long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a site in the current directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Build the static site
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Print the article slugs derived from a directory
    Slugs {
        /// Directory of article files
        dir: PathBuf,

        /// Print a JSON array instead of one slug per line
        #[arg(long)]
        json: bool,
    },

    /// Compare the configured article list against the files on disk
    Check,
}

/// Directory the config file lives in; relative site paths resolve against it.
fn site_root(config: &Path) -> PathBuf {
    match config.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let root = site_root(&cli.config);

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&root, &cli.config, yes)?;
        }
        Commands::Build { output, no_minify } => {
            let minify = if no_minify { Some(false) } else { None };
            commands::build::run(&root, &cli.config, output, minify)?;
        }
        Commands::Slugs { dir, json } => {
            commands::slugs::run(&dir, json)?;
        }
        Commands::Check => {
            commands::check::run(&root, &cli.config)?;
        }
    }

    Ok(())
}
