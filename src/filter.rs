//! Interactive filtering over a fixed venue collection.
//!
//! The engine never reorders or mutates the venues it is given; every
//! operation returns a projection (matching venues in their original
//! order) or a notice explaining why the last criterion was rolled back.

use std::collections::BTreeSet;

use crate::types::Venue;

/// Errors from misusing a filter session
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("Filter session is closed")]
    SessionClosed,

    #[error("Rating threshold must be a non-negative number, got {0}")]
    InvalidThreshold(f64),
}

/// Check that `value` can be used as a rating threshold
pub fn validate_threshold(value: f64) -> Result<f64, FilterError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(FilterError::InvalidThreshold(value))
    }
}

/// Active filter criteria.
///
/// After every threshold-setting operation the last history entry equals
/// the active threshold; an empty history means the default is active.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    keywords: BTreeSet<String>,
    threshold: f64,
    history: Vec<f64>,
    default_threshold: f64,
}

impl FilterState {
    pub fn new(default_threshold: f64) -> Self {
        Self {
            keywords: BTreeSet::new(),
            threshold: default_threshold,
            history: Vec::new(),
            default_threshold,
        }
    }

    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn has_keyword_filter(&self) -> bool {
        !self.keywords.is_empty()
    }

    fn matches(&self, venue: &Venue) -> bool {
        venue.rating >= self.threshold
            && (self.keywords.is_empty() || venue.has_any_keyword(&self.keywords))
    }

    fn clear(&mut self) {
        self.keywords.clear();
        self.history.clear();
        self.threshold = self.default_threshold;
    }
}

/// Why an operation produced no projection
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// No venue carries any requested keyword at the active threshold;
    /// the keyword filter was cleared.
    NoKeywordMatches,
    /// The new threshold left the keyword filter with no venues; the
    /// previous threshold is active again.
    ThresholdRolledBack { rejected: f64, restored: f64 },
}

/// Result of a filter operation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<'v> {
    /// Matching venues in collection order (may be empty for a plain
    /// rating filter)
    Projection(Vec<&'v Venue>),
    Empty(Notice),
}

/// Filter state machine bound to one venue collection
pub struct FilterEngine<'v> {
    venues: &'v [Venue],
    state: FilterState,
    closed: bool,
}

impl<'v> FilterEngine<'v> {
    pub fn new(venues: &'v [Venue], default_threshold: f64) -> Self {
        Self {
            venues,
            state: FilterState::new(default_threshold),
            closed: false,
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Venues matching the active criteria
    pub fn projection(&self) -> Vec<&'v Venue> {
        self.venues
            .iter()
            .filter(|v| self.state.matches(v))
            .collect()
    }

    fn ensure_open(&self) -> Result<(), FilterError> {
        if self.closed {
            Err(FilterError::SessionClosed)
        } else {
            Ok(())
        }
    }

    /// Replace the keyword filter.
    ///
    /// Keywords are trimmed and lowercased; blank entries are dropped. An
    /// empty request removes the keyword filter.
    pub fn apply_keywords<I, S>(&mut self, keywords: I) -> Result<Outcome<'v>, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ensure_open()?;

        self.state.keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        let projection = self.projection();
        if projection.is_empty() && self.state.has_keyword_filter() {
            tracing::debug!(keywords = ?self.state.keywords, "No venues match keywords");
            self.state.keywords.clear();
            return Ok(Outcome::Empty(Notice::NoKeywordMatches));
        }
        Ok(Outcome::Projection(projection))
    }

    /// Set a minimum rating.
    ///
    /// With a keyword filter active, a threshold that leaves no venues is
    /// undone: it is dropped from the history and the previous threshold
    /// (or the default) becomes active again.
    pub fn apply_threshold(&mut self, value: f64) -> Result<Outcome<'v>, FilterError> {
        self.ensure_open()?;
        let value = validate_threshold(value)?;

        self.state.history.push(value);
        self.state.threshold = value;

        let projection = self.projection();
        if projection.is_empty() && self.state.has_keyword_filter() {
            self.state.history.pop();
            let restored = self
                .state
                .history
                .last()
                .copied()
                .unwrap_or(self.state.default_threshold);
            self.state.threshold = restored;
            tracing::debug!(rejected = value, restored, "Rolled back rating threshold");
            return Ok(Outcome::Empty(Notice::ThresholdRolledBack {
                rejected: value,
                restored,
            }));
        }
        Ok(Outcome::Projection(projection))
    }

    /// Clear keywords and threshold history, restoring the default threshold
    pub fn reset(&mut self) -> Result<Outcome<'v>, FilterError> {
        self.ensure_open()?;
        self.state.clear();
        Ok(Outcome::Projection(self.projection()))
    }

    /// End the session; later operations fail with `SessionClosed`
    pub fn exit(&mut self) -> Result<(), FilterError> {
        self.ensure_open()?;
        self.closed = true;
        Ok(())
    }
}
