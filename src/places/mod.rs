//! Collaborator interfaces for venue discovery.
//!
//! The search orchestrator only talks to these traits; [`GoogleMapsClient`]
//! is the HTTP implementation used by the CLI.

mod google;

pub use google::GoogleMapsClient;

use crate::types::{Candidate, Coordinate};

/// Errors raised by the places, reviews and geocoding collaborators
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The request never produced an HTTP response
    #[error("Failed to reach places API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success HTTP status
    #[error("Places API returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The API answered but reported a failure status in its payload
    #[error("Places API reported status {status}{}", detail_suffix(.detail))]
    Status {
        status: String,
        detail: Option<String>,
    },

    /// The payload could not be understood
    #[error("Failed to decode places API response: {0}")]
    Decode(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

/// Domain status carried by every places API payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    Ok,
    ZeroResults,
    Other(String),
}

impl ApiStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "OK" => ApiStatus::Ok,
            "ZERO_RESULTS" => ApiStatus::ZeroResults,
            other => ApiStatus::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiStatus::Ok => write!(f, "OK"),
            ApiStatus::ZeroResults => write!(f, "ZERO_RESULTS"),
            ApiStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

/// A nearby-search request.
///
/// Follow-up pages carry nothing but the continuation token; the API
/// rejects page requests that repeat the original search parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceRequest {
    Search {
        location: Coordinate,
        radius_m: u32,
        category: String,
        keyword: String,
    },
    NextPage {
        token: String,
    },
}

/// One page of nearby-search results
#[derive(Debug, Clone, PartialEq)]
pub struct PlacePage {
    pub status: ApiStatus,
    pub candidates: Vec<Candidate>,
    pub next_page_token: Option<String>,
    /// Human-readable explanation the API attaches to failures
    pub error_message: Option<String>,
}

/// Lists venues near a coordinate
pub trait PlaceSource {
    async fn nearby(&self, request: &PlaceRequest) -> Result<PlacePage, SourceError>;
}

/// Fetches the concatenated review text for a venue
pub trait ReviewSource {
    /// `Ok(None)` when the venue has no (non-blank) reviews
    async fn reviews(&self, place_id: &str) -> Result<Option<String>, SourceError>;
}

/// Resolves free-text locations to coordinates
pub trait Geocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinate, SourceError>;
}
