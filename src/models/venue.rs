use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    /// Named after the form field it is edited through.
    #[serde(rename = "website_link")]
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Every mutable column of a venue. Create and edit both write all of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VenueFields {
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl Venue {
    pub fn from_fields(id: i64, fields: VenueFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            genres: fields.genres,
            address: fields.address,
            city: fields.city,
            state: fields.state,
            phone: fields.phone,
            website: fields.website,
            image_link: fields.image_link,
            facebook_link: fields.facebook_link,
            seeking_talent: fields.seeking_talent,
            seeking_description: fields.seeking_description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every mutable field, leaving only `id` and `created_at`.
    pub fn overwrite(&mut self, fields: VenueFields, now: DateTime<Utc>) {
        *self = Self {
            id: self.id,
            created_at: self.created_at,
            ..Self::from_fields(self.id, fields, now)
        };
    }
}
