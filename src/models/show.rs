use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Show {
    pub id: i64,
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

/// A show joined with the artist and venue it links.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShowListing {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
}

/// Where a show falls relative to a reference instant. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTiming {
    Past,
    Upcoming,
}

impl ShowTiming {
    /// A show starting exactly at `now` counts as upcoming.
    pub fn classify(start_time: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if start_time < now {
            ShowTiming::Past
        } else {
            ShowTiming::Upcoming
        }
    }

    pub fn includes(self, start_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        Self::classify(start_time, now) == self
    }
}
