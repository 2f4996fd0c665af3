//! HTTP client for the Google Maps web services used during discovery:
//! Geocoding, Places Nearby Search and Place Details.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ApiStatus, Geocoder, PlacePage, PlaceRequest, PlaceSource, ReviewSource, SourceError};
use crate::types::{Candidate, Coordinate};

/// Google Maps web service client
pub struct GoogleMapsClient {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct NearbyResponse {
    status: String,
    #[serde(default)]
    results: Vec<NearbyResult>,
    next_page_token: Option<String>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct NearbyResult {
    place_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    vicinity: String,
    rating: Option<f64>,
    geometry: Geometry,
}

impl From<NearbyResult> for Candidate {
    fn from(r: NearbyResult) -> Self {
        Candidate {
            id: r.place_id,
            name: r.name,
            address: r.vicinity,
            location: Coordinate::new(r.geometry.location.lat, r.geometry.location.lng),
            rating: r.rating.unwrap_or(0.0),
        }
    }
}

impl From<NearbyResponse> for PlacePage {
    fn from(r: NearbyResponse) -> Self {
        PlacePage {
            status: ApiStatus::parse(&r.status),
            candidates: r.results.into_iter().map(Candidate::from).collect(),
            next_page_token: r.next_page_token.filter(|t| !t.is_empty()),
            error_message: r.error_message,
        }
    }
}

#[derive(Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<DetailsResult>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct DetailsResult {
    #[serde(default)]
    reviews: Vec<Review>,
}

#[derive(Deserialize)]
struct Review {
    #[serde(default)]
    text: String,
}

impl DetailsResult {
    /// Join all review texts; blank text counts as no reviews
    fn review_text(&self) -> Option<String> {
        let joined = self
            .reviews
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        if joined.trim().is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

impl GoogleMapsClient {
    /// Create a client for the API rooted at `base_url`
    /// (e.g. `https://maps.googleapis.com/maps/api`).
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            api_key,
            http: reqwest::Client::new(),
        }
    }

    /// Return the base URL (for display/logging).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        mut params: Vec<(&str, String)>,
    ) -> Result<T, SourceError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(url = %url, params = ?params, "Places API request");

        if let Some(ref key) = self.api_key {
            params.push(("key", key.clone()));
        }

        let resp = self.http.get(&url).query(&params).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SourceError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| SourceError::Decode(e.to_string()))
    }
}

impl Geocoder for GoogleMapsClient {
    async fn geocode(&self, address: &str) -> Result<Coordinate, SourceError> {
        let resp: GeocodeResponse = self
            .get_json("geocode/json", vec![("address", address.to_string())])
            .await?;

        if ApiStatus::parse(&resp.status) != ApiStatus::Ok {
            return Err(SourceError::Status {
                status: resp.status,
                detail: resp.error_message,
            });
        }

        let first = resp
            .results
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::Decode("geocode response has no results".into()))?;
        Ok(Coordinate::new(
            first.geometry.location.lat,
            first.geometry.location.lng,
        ))
    }
}

impl PlaceSource for GoogleMapsClient {
    async fn nearby(&self, request: &PlaceRequest) -> Result<PlacePage, SourceError> {
        let params = match request {
            PlaceRequest::Search {
                location,
                radius_m,
                category,
                keyword,
            } => vec![
                ("location", location.to_string()),
                ("radius", radius_m.to_string()),
                ("type", category.clone()),
                ("keyword", keyword.clone()),
            ],
            PlaceRequest::NextPage { token } => vec![("pagetoken", token.clone())],
        };

        let resp: NearbyResponse = self.get_json("place/nearbysearch/json", params).await?;
        Ok(resp.into())
    }
}

impl ReviewSource for GoogleMapsClient {
    async fn reviews(&self, place_id: &str) -> Result<Option<String>, SourceError> {
        let resp: DetailsResponse = self
            .get_json(
                "place/details/json",
                vec![
                    ("place_id", place_id.to_string()),
                    ("fields", "reviews".to_string()),
                ],
            )
            .await?;

        if ApiStatus::parse(&resp.status) != ApiStatus::Ok {
            return Err(SourceError::Status {
                status: resp.status,
                detail: resp.error_message,
            });
        }

        let result = resp
            .result
            .ok_or_else(|| SourceError::Decode("details response has no result".into()))?;
        Ok(result.review_text())
    }
}
