use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::OutputConfig;
use crate::config::Config;
use crate::storage::VenueStore;
use crate::types::StoreStats;

#[derive(Args)]
pub struct StatusArgs {
    /// Directory to check status in (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,
}

#[derive(Serialize)]
struct StatusOutput {
    status: String,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<StoreStats>,
}

pub fn run(args: StatusArgs, output: OutputConfig) -> Result<()> {
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("Invalid path: {}", args.path.display()))?;

    let config_path = Config::config_path(&root);
    let data_dir = Config::data_dir(&root);

    if !config_path.exists() {
        if output.json {
            let json_output = StatusOutput {
                status: "not_initialized".to_string(),
                path: root.display().to_string(),
                stats: None,
            };
            println!("{}", serde_json::to_string_pretty(&json_output)?);
        } else if !output.quiet {
            println!(
                "{} matcha-finder not initialized in {}",
                "!".yellow(),
                root.display()
            );
            println!("Run `matcha-finder init` to initialize.");
        }
        return Ok(());
    }

    let store = VenueStore::open(&Config::db_path(&root)).context("Failed to open venue store")?;
    let stats = store.get_stats()?;

    if output.json {
        let json_output = StatusOutput {
            status: "ready".to_string(),
            path: data_dir.display().to_string(),
            stats: Some(stats),
        };
        println!("{}", serde_json::to_string_pretty(&json_output)?);
    } else if !output.quiet {
        println!("{} matcha-finder status for {}", "✓".green(), root.display());
        println!();
        println!("  Status:        {}", "Ready".green());
        println!("  Venues:        {}", stats.total_venues.to_string().cyan());
        println!(
            "  With keywords: {}",
            stats.venues_with_keywords.to_string().cyan()
        );

        if let Some(ts) = stats.last_search {
            let dt = chrono::DateTime::from_timestamp(ts, 0)
                .map_or_else(|| "Unknown".to_string(), |t| t.to_rfc3339());
            println!("  Last search:   {dt}");
        }
        if let Some(location) = &stats.last_location {
            println!("  Location:      {location}");
        }
    }

    Ok(())
}
