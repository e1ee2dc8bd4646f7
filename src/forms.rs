//! Form submissions: presence checks and record construction.

use serde::Serialize;

use crate::models::{ArtistFields, NewShow, VenueFields};
use crate::utils::datetime::parse_datetime;
use crate::utils::error::AppError;

/// Raw urlencoded pairs in submission order. Repeated keys are kept, which is
/// how multi-selects such as `genres` arrive.
#[derive(Debug, Clone, Default)]
pub struct FormData(Vec<(String, String)>);

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

impl FormData {
    pub fn value(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every non-blank value submitted under `key`.
    pub fn values(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, v)| k == key && !v.trim().is_empty())
            .map(|(_, v)| v.trim().to_string())
            .collect()
    }

    /// Checkboxes are only submitted when ticked.
    pub fn is_checked(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn required(&self, key: &str) -> Result<String, AppError> {
        self.optional(key)
            .ok_or_else(|| AppError::ValidationError(format!("Field '{key}' is required")))
    }

    pub fn optional(&self, key: &str) -> Option<String> {
        self.value(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// The submitted name, captured before anything else can fail.
    pub fn name(&self) -> String {
        self.optional("name").unwrap_or_default()
    }

    fn required_id(&self, key: &str) -> Result<i64, AppError> {
        let raw = self.required(key)?;
        raw.parse()
            .map_err(|_| AppError::ValidationError(format!("Field '{key}' must be a numeric id")))
    }
}

pub fn venue_fields(form: &FormData) -> Result<VenueFields, AppError> {
    Ok(VenueFields {
        name: form.required("name")?,
        genres: form.values("genres"),
        address: form.required("address")?,
        city: form.required("city")?,
        state: form.required("state")?,
        phone: form.optional("phone"),
        website: form.optional("website_link"),
        image_link: form.optional("image_link"),
        facebook_link: form.optional("facebook_link"),
        seeking_talent: form.is_checked("seeking_talent"),
        seeking_description: form.optional("seeking_description"),
    })
}

pub fn artist_fields(form: &FormData) -> Result<ArtistFields, AppError> {
    Ok(ArtistFields {
        name: form.required("name")?,
        genres: form.values("genres"),
        city: form.required("city")?,
        state: form.required("state")?,
        phone: form.optional("phone"),
        website: form.optional("website_link"),
        image_link: form.optional("image_link"),
        facebook_link: form.optional("facebook_link"),
        seeking_venue: form.is_checked("seeking_venue"),
        seeking_description: form.optional("seeking_description"),
    })
}

pub fn new_show(form: &FormData) -> Result<NewShow, AppError> {
    let artist_id = form.required_id("artist_id")?;
    let venue_id = form.required_id("venue_id")?;
    let start_time = parse_datetime(&form.required("start_time")?)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    Ok(NewShow {
        artist_id,
        venue_id,
        start_time,
    })
}

/// Describes one input of a form page.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub required: bool,
}

const fn field(name: &'static str, label: &'static str, kind: &'static str, required: bool) -> FormField {
    FormField {
        name,
        label,
        kind,
        required,
    }
}

pub const VENUE_FORM: &[FormField] = &[
    field("name", "Name", "text", true),
    field("city", "City", "text", true),
    field("state", "State", "text", true),
    field("address", "Address", "text", true),
    field("phone", "Phone", "tel", false),
    field("genres", "Genres", "multiselect", false),
    field("image_link", "Image link", "url", false),
    field("facebook_link", "Facebook link", "url", false),
    field("website_link", "Website", "url", false),
    field("seeking_talent", "Looking for talent", "checkbox", false),
    field("seeking_description", "Seeking description", "textarea", false),
];

pub const ARTIST_FORM: &[FormField] = &[
    field("name", "Name", "text", true),
    field("city", "City", "text", true),
    field("state", "State", "text", true),
    field("phone", "Phone", "tel", false),
    field("genres", "Genres", "multiselect", false),
    field("image_link", "Image link", "url", false),
    field("facebook_link", "Facebook link", "url", false),
    field("website_link", "Website", "url", false),
    field("seeking_venue", "Looking for venues", "checkbox", false),
    field("seeking_description", "Seeking description", "textarea", false),
];

pub const SHOW_FORM: &[FormField] = &[
    field("artist_id", "Artist ID", "number", true),
    field("venue_id", "Venue ID", "number", true),
    field("start_time", "Start time", "datetime-local", true),
];

/// A form page: its inputs and, when editing, the current values.
#[derive(Debug, Clone, Serialize)]
pub struct FormPage<T: Serialize> {
    pub fields: &'static [FormField],
    pub values: Option<T>,
}

impl<T: Serialize> FormPage<T> {
    pub fn blank(fields: &'static [FormField]) -> Self {
        Self {
            fields,
            values: None,
        }
    }

    pub fn prefilled(fields: &'static [FormField], values: T) -> Self {
        Self {
            fields,
            values: Some(values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Artist, Venue};
    use chrono::{TimeZone, Utc};

    fn form(pairs: &[(&str, &str)]) -> FormData {
        FormData::from(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_venue_without_seeking_checkbox() {
        let data = form(&[
            ("name", "The Musical Hop"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
            ("genres", "Jazz"),
            ("genres", "Reggae"),
            ("seeking_description", "We are on the lookout for a local artist"),
        ]);

        let fields = venue_fields(&data).unwrap();
        assert!(!fields.seeking_talent);
        assert_eq!(
            fields.seeking_description.as_deref(),
            Some("We are on the lookout for a local artist")
        );
        assert_eq!(fields.genres, vec!["Jazz", "Reggae"]);
        assert_eq!(fields.phone, None);
    }

    #[test]
    fn test_checkbox_presence_sets_flag() {
        let data = form(&[
            ("name", "Guns N Petals"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("seeking_venue", "y"),
        ]);
        assert!(artist_fields(&data).unwrap().seeking_venue);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let data = form(&[("name", "The Musical Hop"), ("city", "San Francisco")]);
        let err = venue_fields(&data).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(msg) if msg.contains("address")));
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let data = form(&[("name", "   "), ("city", "San Francisco"), ("state", "CA")]);
        assert!(artist_fields(&data).is_err());
        assert_eq!(data.name(), "");
    }

    #[test]
    fn test_new_show_parses_fields() {
        let data = form(&[
            ("artist_id", "4"),
            ("venue_id", "1"),
            ("start_time", "2035-04-01 20:00:00"),
        ]);
        let show = new_show(&data).unwrap();
        assert_eq!(show.artist_id, 4);
        assert_eq!(show.venue_id, 1);
        assert_eq!(show.start_time, Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap());
    }

    #[test]
    fn test_new_show_rejects_bad_input() {
        let bad_time = form(&[("artist_id", "4"), ("venue_id", "1"), ("start_time", "soon")]);
        assert!(matches!(new_show(&bad_time), Err(AppError::ValidationError(_))));

        let bad_id = form(&[
            ("artist_id", "four"),
            ("venue_id", "1"),
            ("start_time", "2035-04-01 20:00"),
        ]);
        assert!(matches!(new_show(&bad_id), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_prefilled_values_use_form_field_names() {
        let now = Utc::now();
        let venue = Venue::from_fields(
            1,
            venue_fields(&form(&[
                ("name", "The Musical Hop"),
                ("city", "San Francisco"),
                ("state", "CA"),
                ("address", "1015 Folsom Street"),
                ("website_link", "https://www.themusicalhop.com"),
            ]))
            .unwrap(),
            now,
        );
        let artist = Artist::from_fields(
            2,
            artist_fields(&form(&[
                ("name", "Guns N Petals"),
                ("city", "San Francisco"),
                ("state", "CA"),
                ("website_link", "https://www.gunsnpetalsband.com"),
            ]))
            .unwrap(),
            now,
        );

        let venue_page = serde_json::to_value(FormPage::prefilled(VENUE_FORM, venue)).unwrap();
        let artist_page = serde_json::to_value(FormPage::prefilled(ARTIST_FORM, artist)).unwrap();

        for (page, fields) in [(&venue_page, VENUE_FORM), (&artist_page, ARTIST_FORM)] {
            for field in fields {
                assert!(
                    page["values"].get(field.name).is_some(),
                    "no prefilled value for {}",
                    field.name
                );
            }
        }
        assert_eq!(venue_page["values"]["website_link"], "https://www.themusicalhop.com");
        assert_eq!(artist_page["values"]["website_link"], "https://www.gunsnpetalsband.com");
    }
}
