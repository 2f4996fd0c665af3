use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// A venue candidate as listed by the place source, before reviews are mined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    /// 0.0 when the listing carries no rating
    pub rating: f64,
}

/// A discovered café with the keywords mined from its reviews.
///
/// Built once during discovery and never mutated afterwards; the filter
/// engine only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    pub rating: f64,
    /// Lowercase adjectives in discovery order, duplicates kept
    pub keywords: Vec<String>,
}

impl Venue {
    pub fn from_candidate(candidate: Candidate, keywords: Vec<String>) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            address: candidate.address,
            location: candidate.location,
            rating: candidate.rating,
            keywords,
        }
    }

    /// Whether any of this venue's keywords is in `wanted`
    pub fn has_any_keyword(&self, wanted: &BTreeSet<String>) -> bool {
        self.keywords.iter().any(|k| wanted.contains(k))
    }
}

/// Why a discovery run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The venue cap was reached
    CapReached,
    /// The last page carried no continuation token
    Exhausted,
    /// The place source reported zero results
    NoResults,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::CapReached => write!(f, "cap_reached"),
            StopReason::Exhausted => write!(f, "exhausted"),
            StopReason::NoResults => write!(f, "no_results"),
        }
    }
}

/// Statistics about the venue store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_venues: u64,
    pub venues_with_keywords: u64,
    pub last_search: Option<i64>,
    pub last_location: Option<String>,
}
