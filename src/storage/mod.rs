pub mod sqlite;

pub use self::sqlite::VenueStore;

use anyhow::Result;

use crate::types::Venue;

/// Persists discovered venues.
///
/// `upsert` is insert-if-absent: a venue whose id is already stored is left
/// exactly as first written. Returns whether a new record was inserted.
pub trait ResultStore {
    fn upsert(&mut self, venue: &Venue) -> Result<bool>;
}
