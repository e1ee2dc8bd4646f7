use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{ShowOwner, Store, StoreError};
use crate::models::{Artist, ArtistFields, NewShow, Show, ShowListing, ShowTiming, Venue, VenueFields};

const VENUE_COLUMNS: &str = "id, name, genres, address, city, state, phone, website, image_link, \
     facebook_link, seeking_talent, seeking_description, created_at, updated_at";

const ARTIST_COLUMNS: &str = "id, name, genres, city, state, phone, website, image_link, \
     facebook_link, seeking_venue, seeking_description, created_at, updated_at";

const SHOW_LISTING_SELECT: &str = "SELECT s.id, s.start_time, \
     s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link, \
     s.venue_id, v.name AS venue_name, v.image_link AS venue_image_link \
     FROM shows s \
     JOIN artists a ON a.id = s.artist_id \
     JOIN venues v ON v.id = s.venue_id";

/// PostgreSQL backend. Each write runs in its own transaction, which rolls
/// back when dropped before `commit`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn delete_from(&self, table: &str, id: i64) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;
        let sql = format!("DELETE FROM {table} WHERE id = $1");
        let result = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Names the record a rejected show insert pointed at, from the violated
/// foreign key constraint.
pub(crate) fn missing_reference(constraint: Option<&str>, show: &NewShow) -> StoreError {
    match constraint {
        Some(name) if name.contains("artist") => StoreError::MissingReference {
            entity: "artist",
            id: show.artist_id,
        },
        _ => StoreError::MissingReference {
            entity: "venue",
            id: show.venue_id,
        },
    }
}

/// Escapes LIKE metacharacters so the term matches literally.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn owner_column(owner: ShowOwner) -> (&'static str, i64) {
    match owner {
        ShowOwner::Venue(id) => ("venue_id", id),
        ShowOwner::Artist(id) => ("artist_id", id),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_venues(&self) -> Result<Vec<Venue>, StoreError> {
        let sql = format!("SELECT {VENUE_COLUMNS} FROM venues ORDER BY id");
        let venues = sqlx::query_as::<_, Venue>(&sql).fetch_all(&self.pool).await?;
        Ok(venues)
    }

    async fn search_venues(&self, term: &str) -> Result<Vec<Venue>, StoreError> {
        let sql = format!(
            r"SELECT {VENUE_COLUMNS} FROM venues WHERE name ILIKE $1 ESCAPE '\' ORDER BY id"
        );
        let venues = sqlx::query_as::<_, Venue>(&sql)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await?;
        Ok(venues)
    }

    async fn get_venue(&self, id: i64) -> Result<Option<Venue>, StoreError> {
        let sql = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1");
        let venue = sqlx::query_as::<_, Venue>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(venue)
    }

    async fn create_venue(&self, fields: VenueFields) -> Result<Venue, StoreError> {
        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "INSERT INTO venues (name, genres, address, city, state, phone, website, image_link, \
             facebook_link, seeking_talent, seeking_description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {VENUE_COLUMNS}"
        );
        let venue = sqlx::query_as::<_, Venue>(&sql)
            .bind(fields.name)
            .bind(fields.genres)
            .bind(fields.address)
            .bind(fields.city)
            .bind(fields.state)
            .bind(fields.phone)
            .bind(fields.website)
            .bind(fields.image_link)
            .bind(fields.facebook_link)
            .bind(fields.seeking_talent)
            .bind(fields.seeking_description)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(venue)
    }

    async fn update_venue(
        &self,
        id: i64,
        fields: VenueFields,
    ) -> Result<Option<Venue>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "UPDATE venues SET name = $2, genres = $3, address = $4, city = $5, state = $6, \
             phone = $7, website = $8, image_link = $9, facebook_link = $10, \
             seeking_talent = $11, seeking_description = $12, updated_at = NOW() \
             WHERE id = $1 RETURNING {VENUE_COLUMNS}"
        );
        let venue = sqlx::query_as::<_, Venue>(&sql)
            .bind(id)
            .bind(fields.name)
            .bind(fields.genres)
            .bind(fields.address)
            .bind(fields.city)
            .bind(fields.state)
            .bind(fields.phone)
            .bind(fields.website)
            .bind(fields.image_link)
            .bind(fields.facebook_link)
            .bind(fields.seeking_talent)
            .bind(fields.seeking_description)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(venue)
    }

    async fn delete_venue(&self, id: i64) -> Result<bool, StoreError> {
        self.delete_from("venues", id).await
    }

    async fn list_artists(&self) -> Result<Vec<Artist>, StoreError> {
        let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists ORDER BY id");
        let artists = sqlx::query_as::<_, Artist>(&sql).fetch_all(&self.pool).await?;
        Ok(artists)
    }

    async fn search_artists(&self, term: &str) -> Result<Vec<Artist>, StoreError> {
        let sql = format!(
            r"SELECT {ARTIST_COLUMNS} FROM artists WHERE name ILIKE $1 ESCAPE '\' ORDER BY id"
        );
        let artists = sqlx::query_as::<_, Artist>(&sql)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await?;
        Ok(artists)
    }

    async fn get_artist(&self, id: i64) -> Result<Option<Artist>, StoreError> {
        let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = $1");
        let artist = sqlx::query_as::<_, Artist>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(artist)
    }

    async fn create_artist(&self, fields: ArtistFields) -> Result<Artist, StoreError> {
        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "INSERT INTO artists (name, genres, city, state, phone, website, image_link, \
             facebook_link, seeking_venue, seeking_description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {ARTIST_COLUMNS}"
        );
        let artist = sqlx::query_as::<_, Artist>(&sql)
            .bind(fields.name)
            .bind(fields.genres)
            .bind(fields.city)
            .bind(fields.state)
            .bind(fields.phone)
            .bind(fields.website)
            .bind(fields.image_link)
            .bind(fields.facebook_link)
            .bind(fields.seeking_venue)
            .bind(fields.seeking_description)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(artist)
    }

    async fn update_artist(
        &self,
        id: i64,
        fields: ArtistFields,
    ) -> Result<Option<Artist>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "UPDATE artists SET name = $2, genres = $3, city = $4, state = $5, phone = $6, \
             website = $7, image_link = $8, facebook_link = $9, seeking_venue = $10, \
             seeking_description = $11, updated_at = NOW() \
             WHERE id = $1 RETURNING {ARTIST_COLUMNS}"
        );
        let artist = sqlx::query_as::<_, Artist>(&sql)
            .bind(id)
            .bind(fields.name)
            .bind(fields.genres)
            .bind(fields.city)
            .bind(fields.state)
            .bind(fields.phone)
            .bind(fields.website)
            .bind(fields.image_link)
            .bind(fields.facebook_link)
            .bind(fields.seeking_venue)
            .bind(fields.seeking_description)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(artist)
    }

    async fn delete_artist(&self, id: i64) -> Result<bool, StoreError> {
        self.delete_from("artists", id).await
    }

    async fn list_shows(&self) -> Result<Vec<ShowListing>, StoreError> {
        let sql = format!("{SHOW_LISTING_SELECT} ORDER BY s.start_time, s.id");
        let shows = sqlx::query_as::<_, ShowListing>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(shows)
    }

    async fn shows_for(
        &self,
        owner: ShowOwner,
        timing: ShowTiming,
        now: DateTime<Utc>,
    ) -> Result<Vec<ShowListing>, StoreError> {
        let (column, id) = owner_column(owner);
        let comparison = match timing {
            ShowTiming::Past => "<",
            ShowTiming::Upcoming => ">=",
        };
        let sql = format!(
            "{SHOW_LISTING_SELECT} WHERE s.{column} = $1 AND s.start_time {comparison} $2 \
             ORDER BY s.start_time, s.id"
        );
        let shows = sqlx::query_as::<_, ShowListing>(&sql)
            .bind(id)
            .bind(now)
            .fetch_all(&self.pool)
            .await?;
        Ok(shows)
    }

    async fn count_upcoming_shows(
        &self,
        owner: ShowOwner,
        now: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        let (column, id) = owner_column(owner);
        let sql = format!("SELECT COUNT(*) FROM shows WHERE {column} = $1 AND start_time >= $2");
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(id)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn create_show(&self, show: NewShow) -> Result<Show, StoreError> {
        let mut tx = self.pool.begin().await?;
        let created = sqlx::query_as::<_, Show>(
            "INSERT INTO shows (artist_id, venue_id, start_time) VALUES ($1, $2, $3) \
             RETURNING id, artist_id, venue_id, start_time",
        )
        .bind(show.artist_id)
        .bind(show.venue_id)
        .bind(show.start_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                missing_reference(db.constraint(), &show)
            }
            other => other.into(),
        })?;
        tx.commit().await?;
        Ok(created)
    }
}
