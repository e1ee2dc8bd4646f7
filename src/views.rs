//! Page payloads. Each struct is what one route hands to its page.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Artist, ShowListing, Venue};
use crate::utils::datetime::{format_datetime, DateStyle};

#[derive(Debug, Clone, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<SearchHit>,
}

/// A venue or artist in a listing or search result.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchHit>,
}

impl From<Vec<SearchHit>> for SearchResults {
    fn from(data: Vec<SearchHit>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub search_term: String,
    pub results: SearchResults,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistEntry {
    pub id: i64,
    pub name: String,
}

impl From<Artist> for ArtistEntry {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
        }
    }
}

/// An artist playing at the venue being viewed.
#[derive(Debug, Clone, Serialize)]
pub struct ArtistAppearance {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
    pub start_time_display: String,
}

impl From<ShowListing> for ArtistAppearance {
    fn from(show: ShowListing) -> Self {
        Self {
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time_display: format_datetime(show.start_time, DateStyle::Medium),
            start_time: show.start_time,
        }
    }
}

/// A venue booked by the artist being viewed.
#[derive(Debug, Clone, Serialize)]
pub struct VenueBooking {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
    pub start_time_display: String,
}

impl From<ShowListing> for VenueBooking {
    fn from(show: ShowListing) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            venue_image_link: show.venue_image_link,
            start_time_display: format_datetime(show.start_time, DateStyle::Medium),
            start_time: show.start_time,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_talent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seeking_description: Option<String>,
    pub past_shows: Vec<ArtistAppearance>,
    pub upcoming_shows: Vec<ArtistAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    pub fn new(venue: Venue, past: Vec<ShowListing>, upcoming: Vec<ShowListing>) -> Self {
        let past_shows: Vec<ArtistAppearance> = past.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<ArtistAppearance> =
            upcoming.into_iter().map(Into::into).collect();
        Self {
            id: venue.id,
            name: venue.name,
            genres: venue.genres,
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website,
            facebook_link: venue.facebook_link,
            image_link: venue.image_link,
            seeking_description: venue.seeking_description.filter(|_| venue.seeking_talent),
            seeking_talent: venue.seeking_talent,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_venue: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seeking_description: Option<String>,
    pub past_shows: Vec<VenueBooking>,
    pub upcoming_shows: Vec<VenueBooking>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    pub fn new(artist: Artist, past: Vec<ShowListing>, upcoming: Vec<ShowListing>) -> Self {
        let past_shows: Vec<VenueBooking> = past.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<VenueBooking> = upcoming.into_iter().map(Into::into).collect();
        Self {
            id: artist.id,
            name: artist.name,
            genres: artist.genres,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website,
            facebook_link: artist.facebook_link,
            image_link: artist.image_link,
            seeking_description: artist.seeking_description.filter(|_| artist.seeking_venue),
            seeking_venue: artist.seeking_venue,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

/// One row of the show listing.
#[derive(Debug, Clone, Serialize)]
pub struct ShowRow {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
    pub start_time_display: String,
}

impl From<ShowListing> for ShowRow {
    fn from(show: ShowListing) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time_display: format_datetime(show.start_time, DateStyle::Medium),
            start_time: show.start_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VenueFields;

    #[test]
    fn test_seeking_description_follows_flag() {
        let now = Utc::now();
        let fields = VenueFields {
            name: "The Musical Hop".to_string(),
            seeking_talent: false,
            seeking_description: Some("Looking for jazz trios".to_string()),
            ..VenueFields::default()
        };

        let hidden = VenueDetail::new(Venue::from_fields(1, fields.clone(), now), vec![], vec![]);
        assert_eq!(hidden.seeking_description, None);
        let json = serde_json::to_value(&hidden).unwrap();
        assert!(json.get("seeking_description").is_none());

        let shown = VenueDetail::new(
            Venue::from_fields(
                1,
                VenueFields {
                    seeking_talent: true,
                    ..fields
                },
                now,
            ),
            vec![],
            vec![],
        );
        assert_eq!(
            shown.seeking_description.as_deref(),
            Some("Looking for jazz trios")
        );
    }

    #[test]
    fn test_search_results_count_matches_data() {
        let results = SearchResults::from(vec![
            SearchHit {
                id: 1,
                name: "Guns N Petals".to_string(),
                num_upcoming_shows: 0,
            },
            SearchHit {
                id: 2,
                name: "Matt Quevedo".to_string(),
                num_upcoming_shows: 3,
            },
        ]);
        assert_eq!(results.count, 2);
    }
}
