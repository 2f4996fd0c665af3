//! Venue discovery: pages through nearby-search results, mines each venue's
//! reviews and persists what it finds.
//!
//! Requests are issued strictly one at a time with fixed courtesy delays
//! between them. Any collaborator failure aborts the run; nothing is
//! retried.

use anyhow::Result;
use indicatif::ProgressBar;
use std::time::Duration;

use crate::config::Config;
use crate::extract::{KeywordExtractor, Tagger};
use crate::places::{ApiStatus, PlaceRequest, PlaceSource, ReviewSource, SourceError};
use crate::storage::ResultStore;
use crate::types::{Candidate, Coordinate, StopReason, Venue};

/// Search parameters for one discovery run
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub radius_m: u32,
    pub category: String,
    pub keyword: String,
    /// Product name looked up in review text
    pub term: String,
    pub max_venues: usize,
    pub review_delay: Duration,
    pub page_delay: Duration,
}

impl SearchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            radius_m: config.places.radius_m,
            category: config.places.category.clone(),
            keyword: config.places.keyword.clone(),
            term: config.extraction.term.clone(),
            max_venues: config.places.max_venues,
            review_delay: config.pacing.review_delay(),
            page_delay: config.pacing.page_delay(),
        }
    }
}

/// Outcome of a discovery run
#[derive(Debug)]
pub struct Discovery {
    /// Venues in listing order
    pub venues: Vec<Venue>,
    pub stop: StopReason,
    pub pages: usize,
    /// How many venues were new to the store
    pub inserted: usize,
}

/// Drives the place source, review source, extractor and store
pub struct SearchOrchestrator<'a, P, R, S, T>
where
    T: Tagger,
{
    places: &'a P,
    reviews: &'a R,
    store: &'a mut S,
    extractor: &'a KeywordExtractor<T>,
    settings: SearchSettings,
    progress: Option<ProgressBar>,
}

impl<'a, P, R, S, T> SearchOrchestrator<'a, P, R, S, T>
where
    P: PlaceSource,
    R: ReviewSource,
    S: ResultStore,
    T: Tagger,
{
    pub fn new(
        places: &'a P,
        reviews: &'a R,
        store: &'a mut S,
        extractor: &'a KeywordExtractor<T>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            places,
            reviews,
            store,
            extractor,
            settings,
            progress: None,
        }
    }

    /// Report each processed venue on a progress bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Discover venues around `location`, up to the configured cap.
    pub async fn discover(&mut self, location: Coordinate) -> Result<Discovery> {
        let cap = self.settings.max_venues;
        let mut venues: Vec<Venue> = Vec::new();
        let mut pages = 0;
        let mut inserted = 0;

        if cap == 0 {
            return Ok(Discovery {
                venues,
                stop: StopReason::CapReached,
                pages,
                inserted,
            });
        }

        let mut request = PlaceRequest::Search {
            location,
            radius_m: self.settings.radius_m,
            category: self.settings.category.clone(),
            keyword: self.settings.keyword.clone(),
        };

        let stop = loop {
            let page = self.places.nearby(&request).await?;
            pages += 1;
            tracing::info!(
                page = pages,
                status = %page.status,
                candidates = page.candidates.len(),
                "Fetched nearby-search page"
            );

            match page.status {
                ApiStatus::Ok => {}
                ApiStatus::ZeroResults => break StopReason::NoResults,
                ApiStatus::Other(status) => {
                    return Err(SourceError::Status {
                        status,
                        detail: page.error_message,
                    }
                    .into());
                }
            }

            for candidate in page.candidates {
                if venues.len() >= cap {
                    break;
                }
                let venue = self.process_candidate(candidate).await?;
                if self.store.upsert(&venue)? {
                    inserted += 1;
                }
                if let Some(pb) = &self.progress {
                    pb.set_message(venue.name.clone());
                    pb.inc(1);
                }
                venues.push(venue);
                tokio::time::sleep(self.settings.review_delay).await;
            }

            if venues.len() >= cap {
                break StopReason::CapReached;
            }
            match page.next_page_token {
                Some(token) => {
                    tokio::time::sleep(self.settings.page_delay).await;
                    request = PlaceRequest::NextPage { token };
                }
                None => break StopReason::Exhausted,
            }
        };

        tracing::info!(
            venues = venues.len(),
            inserted,
            pages,
            stop = %stop,
            "Discovery finished"
        );

        Ok(Discovery {
            venues,
            stop,
            pages,
            inserted,
        })
    }

    async fn process_candidate(&self, candidate: Candidate) -> Result<Venue> {
        let text = self.reviews.reviews(&candidate.id).await?;
        let keywords = self
            .extractor
            .extract_opt(text.as_deref(), &self.settings.term);
        tracing::debug!(
            id = %candidate.id,
            name = %candidate.name,
            keywords = keywords.len(),
            "Processed venue"
        );
        Ok(Venue::from_candidate(candidate, keywords))
    }
}
