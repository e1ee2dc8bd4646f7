use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    #[serde(rename = "website_link")]
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArtistFields {
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl Artist {
    pub fn from_fields(id: i64, fields: ArtistFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            genres: fields.genres,
            city: fields.city,
            state: fields.state,
            phone: fields.phone,
            website: fields.website,
            image_link: fields.image_link,
            facebook_link: fields.facebook_link,
            seeking_venue: fields.seeking_venue,
            seeking_description: fields.seeking_description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn overwrite(&mut self, fields: ArtistFields, now: DateTime<Utc>) {
        *self = Self {
            id: self.id,
            created_at: self.created_at,
            ..Self::from_fields(self.id, fields, now)
        };
    }
}
