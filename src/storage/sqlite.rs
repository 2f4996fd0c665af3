use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, Row};
use std::path::Path;

use super::ResultStore;
use crate::types::{Coordinate, StoreStats, Venue};

/// Separator used for the keyword column
const KEYWORD_SEPARATOR: &str = ", ";

/// Venue storage using SQLite
pub struct VenueStore {
    conn: Connection,
}

impl VenueStore {
    /// Open or create a venue store at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open a throwaway in-memory store
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            -- Discovered venues, first write wins
            CREATE TABLE IF NOT EXISTS venues (
                id TEXT PRIMARY KEY,
                name TEXT,
                address TEXT,
                lon REAL,
                lat REAL,
                rating REAL,
                keywords TEXT
            );

            -- Global metadata
            CREATE TABLE IF NOT EXISTS meta (
                key TEXT PRIMARY KEY,
                value TEXT
            );
        "#,
        )?;

        Ok(())
    }

    /// Insert a venue unless its id is already stored
    pub fn insert_if_absent(&self, venue: &Venue) -> Result<bool> {
        let keywords = venue.keywords.join(KEYWORD_SEPARATOR);
        let inserted = self
            .conn
            .execute(
                r#"INSERT INTO venues (id, name, address, lon, lat, rating, keywords)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                   ON CONFLICT(id) DO NOTHING"#,
                (
                    &venue.id,
                    &venue.name,
                    &venue.address,
                    venue.location.lon,
                    venue.location.lat,
                    venue.rating,
                    &keywords,
                ),
            )
            .with_context(|| format!("Failed to store venue {}", venue.id))?;
        Ok(inserted > 0)
    }

    fn venue_from_row(row: &Row<'_>) -> rusqlite::Result<Venue> {
        let keywords: Option<String> = row.get(6)?;
        Ok(Venue {
            id: row.get(0)?,
            name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            address: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            location: Coordinate::new(row.get(4)?, row.get(3)?),
            rating: row.get::<_, Option<f64>>(5)?.unwrap_or(0.0),
            keywords: split_keywords(keywords.as_deref().unwrap_or_default()),
        })
    }

    /// Get a venue by id
    #[cfg(test)]
    pub fn get(&self, id: &str) -> Result<Option<Venue>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, address, lon, lat, rating, keywords FROM venues WHERE id = ?1",
        )?;
        let venue = stmt
            .query_row([id], Self::venue_from_row)
            .optional()?;
        Ok(venue)
    }

    /// Get all stored venues in insertion order
    pub fn all(&self) -> Result<Vec<Venue>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, address, lon, lat, rating, keywords FROM venues ORDER BY rowid",
        )?;
        let venues = stmt
            .query_map([], Self::venue_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(venues)
    }

    /// Number of stored venues
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM venues", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Set a metadata value
    pub fn set_meta(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO meta (key, value) VALUES (?1, ?2)",
            [key, value],
        )?;
        Ok(())
    }

    /// Get a metadata value
    pub fn get_meta(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM meta WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Record when and where the last search ran
    pub fn record_search(&self, location: &str, timestamp: i64) -> Result<()> {
        self.set_meta("last_search", &timestamp.to_string())?;
        self.set_meta("last_location", location)
    }

    /// Get store statistics
    pub fn get_stats(&self) -> Result<StoreStats> {
        let total_venues = self.count()?;
        let with_keywords: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM venues WHERE keywords IS NOT NULL AND keywords != ''",
            [],
            |row| row.get(0),
        )?;
        let last_search = self
            .get_meta("last_search")?
            .and_then(|s| s.parse::<i64>().ok());

        Ok(StoreStats {
            total_venues,
            venues_with_keywords: with_keywords as u64,
            last_search,
            last_location: self.get_meta("last_location")?,
        })
    }
}

impl ResultStore for VenueStore {
    fn upsert(&mut self, venue: &Venue) -> Result<bool> {
        self.insert_if_absent(venue)
    }
}

fn split_keywords(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined
        .split(KEYWORD_SEPARATOR)
        .map(str::to_string)
        .collect()
}
