use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::render::{self, VenueOutput};
use super::{session, OutputConfig};
use crate::config::Config;
use crate::discover::{SearchOrchestrator, SearchSettings};
use crate::extract::{KeywordExtractor, LexiconTagger};
use crate::filter::FilterEngine;
use crate::places::{Geocoder, GoogleMapsClient};
use crate::storage::VenueStore;
use crate::types::{Coordinate, StopReason, Venue};

#[derive(Args)]
pub struct SearchArgs {
    /// City or address to search around (prompted for when omitted)
    #[arg(long, short = 'l', conflicts_with_all = ["lat", "lon"])]
    location: Option<String>,

    /// Latitude of the search centre
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the search centre
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Print the results and skip the filter menu
    #[arg(long)]
    no_interactive: bool,

    /// Project directory (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,
}

/// JSON output format for a discovery run
#[derive(Serialize)]
struct SearchOutput {
    location: String,
    lat: f64,
    lon: f64,
    stop: StopReason,
    pages: usize,
    inserted: usize,
    count: usize,
    venues: Vec<VenueOutput>,
}

/// Where the search is centred
enum Origin {
    Coordinate(Coordinate),
    Address(String),
}

impl SearchArgs {
    fn origin(&self) -> Option<Origin> {
        match (&self.location, self.lat, self.lon) {
            (Some(text), _, _) => Some(Origin::Address(text.clone())),
            (None, Some(lat), Some(lon)) => Some(Origin::Coordinate(Coordinate::new(lat, lon))),
            _ => None,
        }
    }
}

/// Ask for a location on stdin; `None` when input ends or the answer is blank
fn prompt_location<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<String>> {
    write!(out, "Please enter the city you would like to search: ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

pub async fn run(args: SearchArgs, output: OutputConfig) -> Result<()> {
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("Invalid path: {}", args.path.display()))?;
    let config = Config::load_initialized(&root)?;

    let origin = match args.origin() {
        Some(origin) => origin,
        None if output.json => bail!("--location or --lat/--lon is required with --json"),
        None => {
            let answer = prompt_location(&mut std::io::stdin().lock(), &mut std::io::stdout())?;
            match answer {
                Some(text) => Origin::Address(text),
                None => bail!("No location given"),
            }
        }
    };

    let api_key = config.places.resolve_api_key();
    if api_key.is_none() {
        tracing::warn!("No places API key configured; requests will likely be denied");
    }
    let client = GoogleMapsClient::new(&config.places.base_url, api_key);
    tracing::debug!(base_url = client.base_url(), "Using places API");

    let (label, center) = match origin {
        Origin::Coordinate(c) => (c.to_string(), c),
        Origin::Address(text) => {
            let c = client
                .geocode(&text)
                .await
                .with_context(|| format!("Failed to geocode '{text}'"))?;
            (text, c)
        }
    };
    tracing::info!(location = %label, center = %center, "Searching for venues");

    let mut store =
        VenueStore::open(&Config::db_path(&root)).context("Failed to open venue store")?;
    let extractor = KeywordExtractor::new(
        LexiconTagger::new().with_adjectives(&config.extraction.extra_adjectives),
    );
    let settings = SearchSettings::from_config(&config);

    let discovery = {
        let mut orchestrator =
            SearchOrchestrator::new(&client, &client, &mut store, &extractor, settings);

        let progress = if output.quiet || output.json {
            None
        } else {
            let pb = ProgressBar::new(config.places.max_venues as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .context("Invalid progress bar template")?
                    .progress_chars("#>-"),
            );
            orchestrator = orchestrator.with_progress(pb.clone());
            Some(pb)
        };

        let result = orchestrator.discover(center).await;
        if let Some(pb) = progress {
            pb.finish_and_clear();
        }
        result.context("Venue discovery failed")?
    };

    store.record_search(&label, chrono::Utc::now().timestamp())?;

    if output.json {
        let json_output = SearchOutput {
            location: label,
            lat: center.lat,
            lon: center.lon,
            stop: discovery.stop,
            pages: discovery.pages,
            inserted: discovery.inserted,
            count: discovery.venues.len(),
            venues: discovery.venues.iter().map(VenueOutput::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&json_output)?);
        return Ok(());
    }

    if discovery.venues.is_empty() {
        println!(
            "{} There are unfortunately no cafés serving {} in your area",
            "!".yellow(),
            config.places.keyword
        );
        return Ok(());
    }

    print_discovery(&discovery.venues, discovery.inserted, output)?;

    if !args.no_interactive {
        let mut engine = FilterEngine::new(&discovery.venues, config.filter.default_threshold);
        session::run(
            &mut engine,
            &mut std::io::stdin().lock(),
            &mut std::io::stdout().lock(),
        )?;
    }

    Ok(())
}

fn print_discovery(venues: &[Venue], inserted: usize, output: OutputConfig) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    if !output.quiet {
        writeln!(
            stdout,
            "{} Found {} cafés ({} new)",
            "✓".green(),
            venues.len(),
            inserted
        )?;
    }
    let all: Vec<&Venue> = venues.iter().collect();
    render::write_venues(&mut stdout, &all)?;
    Ok(())
}
