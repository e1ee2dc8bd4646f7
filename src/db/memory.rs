use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{ShowOwner, Store, StoreError};
use crate::models::{Artist, ArtistFields, NewShow, Show, ShowListing, ShowTiming, Venue, VenueFields};

#[derive(Default)]
struct Tables {
    venues: BTreeMap<i64, Venue>,
    artists: BTreeMap<i64, Artist>,
    shows: BTreeMap<i64, Show>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn listing(&self, show: &Show) -> Option<ShowListing> {
        let artist = self.artists.get(&show.artist_id)?;
        let venue = self.venues.get(&show.venue_id)?;
        Some(ShowListing {
            id: show.id,
            start_time: show.start_time,
            artist_id: artist.id,
            artist_name: artist.name.clone(),
            artist_image_link: artist.image_link.clone(),
            venue_id: venue.id,
            venue_name: venue.name.clone(),
            venue_image_link: venue.image_link.clone(),
        })
    }

    fn listings(&self) -> Vec<ShowListing> {
        let mut listings: Vec<ShowListing> =
            self.shows.values().filter_map(|show| self.listing(show)).collect();
        listings.sort_by_key(|listing| (listing.start_time, listing.id));
        listings
    }
}

fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

/// In-process backend. Ids come from one shared sequence; writes hold the
/// table lock for their whole duration, so each one is atomic.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_venues(&self) -> Result<Vec<Venue>, StoreError> {
        Ok(self.tables.read().await.venues.values().cloned().collect())
    }

    async fn search_venues(&self, term: &str) -> Result<Vec<Venue>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .venues
            .values()
            .filter(|venue| name_matches(&venue.name, term))
            .cloned()
            .collect())
    }

    async fn get_venue(&self, id: i64) -> Result<Option<Venue>, StoreError> {
        Ok(self.tables.read().await.venues.get(&id).cloned())
    }

    async fn create_venue(&self, fields: VenueFields) -> Result<Venue, StoreError> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let venue = Venue::from_fields(id, fields, Utc::now());
        tables.venues.insert(id, venue.clone());
        Ok(venue)
    }

    async fn update_venue(
        &self,
        id: i64,
        fields: VenueFields,
    ) -> Result<Option<Venue>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.venues.get_mut(&id).map(|venue| {
            venue.overwrite(fields, Utc::now());
            venue.clone()
        }))
    }

    async fn delete_venue(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.venues.remove(&id).is_none() {
            return Ok(false);
        }
        tables.shows.retain(|_, show| show.venue_id != id);
        Ok(true)
    }

    async fn list_artists(&self) -> Result<Vec<Artist>, StoreError> {
        Ok(self.tables.read().await.artists.values().cloned().collect())
    }

    async fn search_artists(&self, term: &str) -> Result<Vec<Artist>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .artists
            .values()
            .filter(|artist| name_matches(&artist.name, term))
            .cloned()
            .collect())
    }

    async fn get_artist(&self, id: i64) -> Result<Option<Artist>, StoreError> {
        Ok(self.tables.read().await.artists.get(&id).cloned())
    }

    async fn create_artist(&self, fields: ArtistFields) -> Result<Artist, StoreError> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let artist = Artist::from_fields(id, fields, Utc::now());
        tables.artists.insert(id, artist.clone());
        Ok(artist)
    }

    async fn update_artist(
        &self,
        id: i64,
        fields: ArtistFields,
    ) -> Result<Option<Artist>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.artists.get_mut(&id).map(|artist| {
            artist.overwrite(fields, Utc::now());
            artist.clone()
        }))
    }

    async fn delete_artist(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.artists.remove(&id).is_none() {
            return Ok(false);
        }
        tables.shows.retain(|_, show| show.artist_id != id);
        Ok(true)
    }

    async fn list_shows(&self) -> Result<Vec<ShowListing>, StoreError> {
        Ok(self.tables.read().await.listings())
    }

    async fn shows_for(
        &self,
        owner: ShowOwner,
        timing: ShowTiming,
        now: DateTime<Utc>,
    ) -> Result<Vec<ShowListing>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .listings()
            .into_iter()
            .filter(|listing| owner.owns(listing) && timing.includes(listing.start_time, now))
            .collect())
    }

    async fn count_upcoming_shows(
        &self,
        owner: ShowOwner,
        now: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        let count = tables
            .shows
            .values()
            .filter(|show| {
                owner.matches(show.artist_id, show.venue_id)
                    && ShowTiming::Upcoming.includes(show.start_time, now)
            })
            .count();
        Ok(count as i64)
    }

    async fn create_show(&self, show: NewShow) -> Result<Show, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.artists.contains_key(&show.artist_id) {
            return Err(StoreError::MissingReference {
                entity: "artist",
                id: show.artist_id,
            });
        }
        if !tables.venues.contains_key(&show.venue_id) {
            return Err(StoreError::MissingReference {
                entity: "venue",
                id: show.venue_id,
            });
        }

        let id = tables.next_id();
        let created = Show {
            id,
            artist_id: show.artist_id,
            venue_id: show.venue_id,
            start_time: show.start_time,
        };
        tables.shows.insert(id, created.clone());
        Ok(created)
    }
}
