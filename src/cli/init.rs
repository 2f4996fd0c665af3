use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::OutputConfig;
use crate::config::Config;
use crate::storage::VenueStore;

#[derive(Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Overwrite existing configuration and discard stored venues
    #[arg(long)]
    force: bool,
}

#[derive(Serialize)]
struct InitOutput {
    status: String,
    path: String,
    config: String,
    database: String,
}

pub fn run(args: InitArgs, output: OutputConfig) -> Result<()> {
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("Invalid path: {}", args.path.display()))?;

    let data_dir = Config::data_dir(&root);
    let config_path = Config::config_path(&root);
    let db_path = Config::db_path(&root);

    let json_output = |status: &str| InitOutput {
        status: status.to_string(),
        path: data_dir.display().to_string(),
        config: config_path.display().to_string(),
        database: db_path.display().to_string(),
    };

    if config_path.exists() && !args.force {
        if output.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&json_output("already_initialized"))?
            );
            return Ok(());
        }
        bail!(
            "matcha-finder already initialized in {}. Use --force to reinitialize.",
            data_dir.display()
        );
    }

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

    Config::default().save(&config_path)?;
    if output.verbose && !output.quiet && !output.json {
        println!("  Creating config: {}", config_path.display());
    }

    if args.force && db_path.exists() {
        std::fs::remove_file(&db_path).with_context(|| {
            format!("Failed to remove existing database: {}", db_path.display())
        })?;
    }
    VenueStore::open(&db_path).with_context(|| {
        format!("Failed to initialize SQLite database: {}", db_path.display())
    })?;
    if output.verbose && !output.quiet && !output.json {
        println!("  Creating database: {}", db_path.display());
    }

    tracing::debug!(path = %data_dir.display(), "Initialized data directory");

    if output.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json_output("initialized"))?
        );
    } else if !output.quiet {
        println!(
            "{} matcha-finder initialized in {}",
            "✓".green(),
            data_dir.display()
        );
        println!("  Config:   {}", config_path.display());
        println!("  Database: {}", db_path.display());
        println!("\nNext steps:");
        println!("  Set {} or edit the config", "GOOGLE_MAPS_API_KEY".cyan());
        println!("  {} to find cafés", "matcha-finder search".cyan());
    }

    Ok(())
}
