//! Read side of the directory: listings, searches and detail pages
//! assembled from store queries.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::db::{ShowOwner, Store, StoreError};
use crate::models::{ShowTiming, Venue};
use crate::utils::error::AppError;
use crate::views::{
    ArtistDetail, ArtistEntry, SearchHit, SearchResults, ShowRow, VenueArea, VenueDetail,
};

/// Groups venues by (city, state). Areas come out ordered by state then city,
/// venues keep their input order.
pub fn group_by_area(venues: Vec<(Venue, i64)>) -> Vec<VenueArea> {
    let mut areas: BTreeMap<(String, String), Vec<SearchHit>> = BTreeMap::new();
    for (venue, num_upcoming_shows) in venues {
        areas
            .entry((venue.state, venue.city))
            .or_default()
            .push(SearchHit {
                id: venue.id,
                name: venue.name,
                num_upcoming_shows,
            });
    }

    areas
        .into_iter()
        .map(|((state, city), venues)| VenueArea {
            city,
            state,
            venues,
        })
        .collect()
}

pub async fn venue_areas(store: &dyn Store, now: DateTime<Utc>) -> Result<Vec<VenueArea>, AppError> {
    let venues = store.list_venues().await?;
    let mut counted = Vec::with_capacity(venues.len());
    for venue in venues {
        let upcoming = store
            .count_upcoming_shows(ShowOwner::Venue(venue.id), now)
            .await?;
        counted.push((venue, upcoming));
    }
    Ok(group_by_area(counted))
}

async fn hits<I>(
    store: &dyn Store,
    records: I,
    now: DateTime<Utc>,
) -> Result<SearchResults, StoreError>
where
    I: IntoIterator<Item = (ShowOwner, String)>,
{
    let mut data = Vec::new();
    for (owner, name) in records {
        let num_upcoming_shows = store.count_upcoming_shows(owner, now).await?;
        let id = match owner {
            ShowOwner::Venue(id) | ShowOwner::Artist(id) => id,
        };
        data.push(SearchHit {
            id,
            name,
            num_upcoming_shows,
        });
    }
    Ok(SearchResults::from(data))
}

pub async fn search_venues(
    store: &dyn Store,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults, AppError> {
    let venues = store.search_venues(term).await?;
    let records = venues
        .into_iter()
        .map(|venue| (ShowOwner::Venue(venue.id), venue.name));
    Ok(hits(store, records, now).await?)
}

pub async fn search_artists(
    store: &dyn Store,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults, AppError> {
    let artists = store.search_artists(term).await?;
    let records = artists
        .into_iter()
        .map(|artist| (ShowOwner::Artist(artist.id), artist.name));
    Ok(hits(store, records, now).await?)
}

pub async fn venue_detail(
    store: &dyn Store,
    venue_id: i64,
    now: DateTime<Utc>,
) -> Result<VenueDetail, AppError> {
    let venue = store
        .get_venue(venue_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue with id '{venue_id}' was not found")))?;

    let owner = ShowOwner::Venue(venue_id);
    let past = store.shows_for(owner, ShowTiming::Past, now).await?;
    let upcoming = store.shows_for(owner, ShowTiming::Upcoming, now).await?;
    Ok(VenueDetail::new(venue, past, upcoming))
}

pub async fn artist_detail(
    store: &dyn Store,
    artist_id: i64,
    now: DateTime<Utc>,
) -> Result<ArtistDetail, AppError> {
    let artist = store
        .get_artist(artist_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist with id '{artist_id}' was not found")))?;

    let owner = ShowOwner::Artist(artist_id);
    let past = store.shows_for(owner, ShowTiming::Past, now).await?;
    let upcoming = store.shows_for(owner, ShowTiming::Upcoming, now).await?;
    Ok(ArtistDetail::new(artist, past, upcoming))
}

pub async fn artist_entries(store: &dyn Store) -> Result<Vec<ArtistEntry>, AppError> {
    let artists = store.list_artists().await?;
    Ok(artists.into_iter().map(ArtistEntry::from).collect())
}

pub async fn show_rows(store: &dyn Store) -> Result<Vec<ShowRow>, AppError> {
    let shows = store.list_shows().await?;
    Ok(shows.into_iter().map(ShowRow::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VenueFields;
    use std::collections::HashSet;

    fn venue(id: i64, name: &str, city: &str, state: &str) -> Venue {
        Venue::from_fields(
            id,
            VenueFields {
                name: name.to_string(),
                city: city.to_string(),
                state: state.to_string(),
                ..VenueFields::default()
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_group_by_area_partitions_venues() {
        let venues = vec![
            (venue(1, "The Musical Hop", "San Francisco", "CA"), 0),
            (venue(2, "The Dueling Pianos Bar", "New York", "NY"), 1),
            (venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA"), 2),
            (venue(4, "Portland Hall", "Portland", "ME"), 0),
            (venue(5, "Portland Hall", "Portland", "OR"), 0),
        ];

        let areas = group_by_area(venues);

        let keys: Vec<(&str, &str)> = areas
            .iter()
            .map(|area| (area.city.as_str(), area.state.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("San Francisco", "CA"),
                ("Portland", "ME"),
                ("New York", "NY"),
                ("Portland", "OR"),
            ]
        );

        let ids: Vec<i64> = areas
            .iter()
            .flat_map(|area| area.venues.iter().map(|v| v.id))
            .collect();
        let unique: HashSet<i64> = ids.iter().copied().collect();
        assert_eq!(ids.len(), 5);
        assert_eq!(unique.len(), 5);

        assert_eq!(areas[0].venues[0].id, 1);
        assert_eq!(areas[0].venues[1].num_upcoming_shows, 2);
    }

    #[test]
    fn test_group_by_area_empty() {
        assert!(group_by_area(Vec::new()).is_empty());
    }
}
