//! PostgreSQL backend tests. They need a disposable database in
//! `DATABASE_URL` and skip themselves when it is unset.

use chrono::{Duration, Utc};
use showbook_server::db::{PgStore, ShowOwner, Store, StoreError, MEMORY_URL_PREFIX};
use showbook_server::models::{ArtistFields, NewShow, ShowTiming, VenueFields};

async fn setup_store() -> Option<PgStore> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.starts_with(MEMORY_URL_PREFIX) => url,
        _ => {
            eprintln!("Skipping test: DATABASE_URL is not a PostgreSQL database");
            return None;
        }
    };

    let store = PgStore::connect(&url, 2)
        .await
        .expect("Should connect to test database");
    store.migrate().await.expect("Should run migrations");
    Some(store)
}

fn unique(name: &str) -> String {
    format!("{name} {}", Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

fn venue_fields(name: &str) -> VenueFields {
    VenueFields {
        name: name.to_string(),
        address: "1015 Folsom Street".to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        genres: vec!["Jazz".to_string(), "Reggae".to_string()],
        ..VenueFields::default()
    }
}

fn artist_fields(name: &str) -> ArtistFields {
    ArtistFields {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        ..ArtistFields::default()
    }
}

#[tokio::test]
async fn test_venue_round_trip_and_overwrite() {
    let Some(store) = setup_store().await else {
        return;
    };

    let name = unique("The Musical Hop");
    let venue = store.create_venue(venue_fields(&name)).await.unwrap();
    assert_eq!(venue.genres, vec!["Jazz", "Reggae"]);
    assert!(!venue.seeking_talent);

    let updated = store
        .update_venue(
            venue.id,
            VenueFields {
                genres: Vec::new(),
                seeking_talent: true,
                seeking_description: Some("Bands".to_string()),
                ..venue_fields(&name)
            },
        )
        .await
        .unwrap()
        .expect("venue exists");
    assert!(updated.genres.is_empty());
    assert!(updated.seeking_talent);
    assert_eq!(updated.created_at, venue.created_at);

    assert!(store.delete_venue(venue.id).await.unwrap());
    assert!(store.get_venue(venue.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_search_escapes_wildcards() {
    let Some(store) = setup_store().await else {
        return;
    };

    let marker = unique("100% Live_");
    let venue = store.create_venue(venue_fields(&marker)).await.unwrap();

    let hits = store.search_venues(&marker.to_uppercase()).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, venue.id);

    let loose = marker.replace('%', "x");
    assert!(store.search_venues(&loose).await.unwrap().is_empty());

    store.delete_venue(venue.id).await.unwrap();
}

#[tokio::test]
async fn test_shows_partition_and_cascade() {
    let Some(store) = setup_store().await else {
        return;
    };

    let venue = store
        .create_venue(venue_fields(&unique("Park Square")))
        .await
        .unwrap();
    let artist = store
        .create_artist(artist_fields(&unique("Guns N Petals")))
        .await
        .unwrap();
    let now = Utc::now();
    for offset in [-5, 5, 9] {
        store
            .create_show(NewShow {
                artist_id: artist.id,
                venue_id: venue.id,
                start_time: now + Duration::days(offset),
            })
            .await
            .unwrap();
    }

    let owner = ShowOwner::Artist(artist.id);
    assert_eq!(store.count_upcoming_shows(owner, now).await.unwrap(), 2);
    let past = store.shows_for(owner, ShowTiming::Past, now).await.unwrap();
    assert_eq!(past.len(), 1);
    assert_eq!(past[0].venue_name, venue.name);

    assert!(store.delete_venue(venue.id).await.unwrap());
    assert_eq!(store.count_upcoming_shows(owner, now).await.unwrap(), 0);

    store.delete_artist(artist.id).await.unwrap();
}

#[tokio::test]
async fn test_create_show_requires_existing_records() {
    let Some(store) = setup_store().await else {
        return;
    };

    let artist = store
        .create_artist(artist_fields(&unique("Matt Quevedo")))
        .await
        .unwrap();

    let result = store
        .create_show(NewShow {
            artist_id: artist.id,
            venue_id: -1,
            start_time: Utc::now(),
        })
        .await;
    assert!(matches!(
        result,
        Err(StoreError::MissingReference { entity: "venue", id: -1 })
    ));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows WHERE artist_id = $1")
        .bind(artist.id)
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);

    store.delete_artist(artist.id).await.unwrap();
}

#[tokio::test]
async fn test_create_show_names_the_missing_artist() {
    let Some(store) = setup_store().await else {
        return;
    };

    let venue = store
        .create_venue(venue_fields(&unique("The Dueling Pianos Bar")))
        .await
        .unwrap();

    let result = store
        .create_show(NewShow {
            artist_id: -1,
            venue_id: venue.id,
            start_time: Utc::now(),
        })
        .await;
    assert!(matches!(
        result,
        Err(StoreError::MissingReference { entity: "artist", id: -1 })
    ));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows WHERE venue_id = $1")
        .bind(venue.id)
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);

    store.delete_venue(venue.id).await.unwrap();
}
