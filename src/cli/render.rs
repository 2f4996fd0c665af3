//! Plain-text and JSON rendering of venues and filter outcomes.

use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

use crate::filter::{Notice, Outcome};
use crate::types::Venue;

/// JSON shape of a single venue
#[derive(Serialize)]
pub struct VenueOutput {
    pub id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lon: f64,
    pub rating: f64,
    pub keywords: Vec<String>,
}

impl From<&Venue> for VenueOutput {
    fn from(v: &Venue) -> Self {
        Self {
            id: v.id.clone(),
            name: v.name.clone(),
            address: v.address.clone(),
            lat: v.location.lat,
            lon: v.location.lon,
            rating: v.rating,
            keywords: v.keywords.clone(),
        }
    }
}

/// Join words as prose: `a`, `a and b`, `a, b and c`.
///
/// Repeated words are listed once, in first-seen order.
pub fn human_list(words: &[String]) -> String {
    let mut unique: Vec<&str> = Vec::new();
    for w in words {
        if !unique.contains(&w.as_str()) {
            unique.push(w.as_str());
        }
    }
    match unique.as_slice() {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn format_rating(rating: f64) -> String {
    if rating > 0.0 {
        format!("{rating:.1}")
    } else {
        "unrated".to_string()
    }
}

/// Write one venue block
pub fn write_venue<W: Write>(out: &mut W, venue: &Venue) -> io::Result<()> {
    writeln!(out, "{}", venue.name.bold())?;
    writeln!(out, "  Address:  {}", venue.address)?;
    writeln!(out, "  Rating:   {}", format_rating(venue.rating))?;
    if !venue.keywords.is_empty() {
        writeln!(out, "  Keywords: {}", human_list(&venue.keywords).cyan())?;
    }
    Ok(())
}

pub fn write_venues<W: Write>(out: &mut W, venues: &[&Venue]) -> io::Result<()> {
    for venue in venues {
        writeln!(out)?;
        write_venue(out, venue)?;
    }
    Ok(())
}

/// Render the result of a filter operation.
///
/// `threshold` is the active rating threshold after the operation.
pub fn write_outcome<W: Write>(out: &mut W, outcome: &Outcome<'_>, threshold: f64) -> io::Result<()> {
    match outcome {
        Outcome::Projection(venues) if venues.is_empty() => writeln!(
            out,
            "{} No cafés with a rating of at least {threshold:.1}.",
            "!".yellow()
        ),
        Outcome::Projection(venues) => {
            writeln!(out, "{} {} matching cafés", "✓".green(), venues.len())?;
            write_venues(out, venues)
        }
        Outcome::Empty(Notice::NoKeywordMatches) => writeln!(
            out,
            "{} No cafés match those keywords. Keyword filter cleared.",
            "!".yellow()
        ),
        Outcome::Empty(Notice::ThresholdRolledBack { rejected, restored }) => writeln!(
            out,
            "{} No cafés match your keywords with a rating of at least {rejected:.1}. Rating filter back to {restored:.1}.",
            "!".yellow()
        ),
    }
}
