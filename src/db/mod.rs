//! Storage for the booking directory.
//!
//! Handlers only see the [`Store`] trait. `DATABASE_URL=memory:` selects the
//! in-process backend; anything else is handed to PostgreSQL.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::Config;
use crate::models::{Artist, ArtistFields, NewShow, Show, ShowListing, ShowTiming, Venue, VenueFields};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub const MEMORY_URL_PREFIX: &str = "memory:";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{entity} {id} does not exist")]
    MissingReference { entity: &'static str, id: i64 },
}

/// The record whose shows are being looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOwner {
    Venue(i64),
    Artist(i64),
}

impl ShowOwner {
    pub fn matches(self, artist_id: i64, venue_id: i64) -> bool {
        match self {
            ShowOwner::Venue(id) => venue_id == id,
            ShowOwner::Artist(id) => artist_id == id,
        }
    }

    pub fn owns(self, listing: &ShowListing) -> bool {
        self.matches(listing.artist_id, listing.venue_id)
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn list_venues(&self) -> Result<Vec<Venue>, StoreError>;

    /// Case-insensitive substring match on the venue name.
    async fn search_venues(&self, term: &str) -> Result<Vec<Venue>, StoreError>;

    async fn get_venue(&self, id: i64) -> Result<Option<Venue>, StoreError>;

    async fn create_venue(&self, fields: VenueFields) -> Result<Venue, StoreError>;

    /// Overwrites every mutable field. `None` when the venue does not exist.
    async fn update_venue(&self, id: i64, fields: VenueFields)
        -> Result<Option<Venue>, StoreError>;

    /// Removes the venue and its shows. `false` when nothing was deleted.
    async fn delete_venue(&self, id: i64) -> Result<bool, StoreError>;

    async fn list_artists(&self) -> Result<Vec<Artist>, StoreError>;

    async fn search_artists(&self, term: &str) -> Result<Vec<Artist>, StoreError>;

    async fn get_artist(&self, id: i64) -> Result<Option<Artist>, StoreError>;

    async fn create_artist(&self, fields: ArtistFields) -> Result<Artist, StoreError>;

    async fn update_artist(
        &self,
        id: i64,
        fields: ArtistFields,
    ) -> Result<Option<Artist>, StoreError>;

    async fn delete_artist(&self, id: i64) -> Result<bool, StoreError>;

    /// Every show joined with its artist and venue, earliest first.
    async fn list_shows(&self) -> Result<Vec<ShowListing>, StoreError>;

    async fn shows_for(
        &self,
        owner: ShowOwner,
        timing: ShowTiming,
        now: DateTime<Utc>,
    ) -> Result<Vec<ShowListing>, StoreError>;

    async fn count_upcoming_shows(
        &self,
        owner: ShowOwner,
        now: DateTime<Utc>,
    ) -> Result<i64, StoreError>;

    /// Fails with [`StoreError::MissingReference`] when the artist or venue is unknown.
    async fn create_show(&self, show: NewShow) -> Result<Show, StoreError>;
}

pub async fn connect(config: &Config) -> Result<Arc<dyn Store>, StoreError> {
    if config.database_url.starts_with(MEMORY_URL_PREFIX) {
        tracing::warn!("Using the in-memory store; nothing will be persisted");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = PgStore::connect(&config.database_url, config.max_connections).await?;
    tracing::info!("Successfully connected to database");

    store.migrate().await?;
    tracing::info!("Migrations run successfully");

    Ok(Arc::new(store))
}
