use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::render::{self, VenueOutput};
use super::OutputConfig;
use crate::config::Config;
use crate::filter::{FilterEngine, Notice, Outcome};
use crate::storage::VenueStore;
use crate::types::Venue;

#[derive(Args)]
pub struct VenuesArgs {
    /// Only show venues carrying this keyword (repeatable)
    #[arg(long = "keyword", short = 'k')]
    keywords: Vec<String>,

    /// Only show venues rated at least this high
    #[arg(long)]
    min_rating: Option<f64>,

    /// Project directory (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,
}

#[derive(Serialize)]
struct VenuesOutput {
    total: usize,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
    venues: Vec<VenueOutput>,
}

pub fn run(args: VenuesArgs, output: OutputConfig) -> Result<()> {
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("Invalid path: {}", args.path.display()))?;
    let config = Config::load_initialized(&root)?;

    let store = VenueStore::open(&Config::db_path(&root)).context("Failed to open venue store")?;
    let stored: Vec<Venue> = store.all()?;

    let mut engine = FilterEngine::new(&stored, config.filter.default_threshold);
    let mut outcome = Outcome::Projection(engine.projection());
    if let Some(min_rating) = args.min_rating {
        outcome = engine.apply_threshold(min_rating)?;
    }
    if !args.keywords.is_empty() {
        outcome = engine.apply_keywords(&args.keywords)?;
    }
    tracing::debug!(
        keywords = ?engine.state().keywords(),
        threshold = engine.state().threshold(),
        history = ?engine.state().history(),
        "Applied stored-venue filters"
    );

    if output.json {
        let (venues, notice): (Vec<VenueOutput>, Option<String>) = match &outcome {
            Outcome::Projection(venues) => {
                (venues.iter().map(|v| VenueOutput::from(*v)).collect(), None)
            }
            Outcome::Empty(Notice::NoKeywordMatches) => {
                (Vec::new(), Some("no_keyword_matches".to_string()))
            }
            Outcome::Empty(Notice::ThresholdRolledBack { .. }) => {
                (Vec::new(), Some("threshold_rolled_back".to_string()))
            }
        };
        let json_output = VenuesOutput {
            total: stored.len(),
            count: venues.len(),
            notice,
            venues,
        };
        println!("{}", serde_json::to_string_pretty(&json_output)?);
        return Ok(());
    }

    if stored.is_empty() {
        if !output.quiet {
            println!(
                "{} No venues stored yet. Run `matcha-finder search` first.",
                "!".yellow()
            );
        }
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    render::write_outcome(&mut stdout, &outcome, engine.state().threshold())?;
    Ok(())
}
