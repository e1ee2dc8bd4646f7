use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;
use serde::Deserialize;

use crate::directory;
use crate::extract::{RecordId, Submitted};
use crate::forms::{self, FormPage, VENUE_FORM};
use crate::models::Venue;
use crate::utils::error::AppError;
use crate::utils::response::{created, page};
use crate::views::SearchPage;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search_term: String,
}

fn venue_not_found(venue_id: i64) -> AppError {
    AppError::NotFound(format!("Venue with id '{venue_id}' was not found"))
}

pub async fn list_venues(State(state): State<AppState>) -> Result<Response, AppError> {
    let areas = directory::venue_areas(state.store.as_ref(), Utc::now()).await?;
    Ok(page(areas))
}

async fn search(state: &AppState, search_term: String) -> Result<Response, AppError> {
    let results = directory::search_venues(state.store.as_ref(), &search_term, Utc::now()).await?;
    Ok(page(SearchPage {
        search_term,
        results,
    }))
}

pub async fn search_venues(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    search(&state, query.search_term).await
}

pub async fn search_venues_submission(
    State(state): State<AppState>,
    Submitted(form): Submitted,
) -> Result<Response, AppError> {
    search(&state, form.value("search_term").unwrap_or_default().to_string()).await
}

pub async fn show_venue(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
) -> Result<Response, AppError> {
    let detail = directory::venue_detail(state.store.as_ref(), venue_id, Utc::now()).await?;
    Ok(page(detail))
}

pub async fn create_venue_form() -> Response {
    page(FormPage::<Venue>::blank(VENUE_FORM))
}

pub async fn create_venue_submission(
    State(state): State<AppState>,
    submitted: Result<Submitted, AppError>,
) -> Result<Response, AppError> {
    let Submitted(form) = submitted.map_err(|e| AppError::not_listed("Venue", "", e))?;
    let name = form.name();

    let fields = forms::venue_fields(&form).map_err(|e| AppError::not_listed("Venue", &name, e))?;
    let venue = state
        .store
        .create_venue(fields)
        .await
        .map_err(|e| AppError::not_listed("Venue", &name, e.into()))?;

    tracing::info!(venue_id = venue.id, name = %venue.name, "Venue listed");
    let message = format!("Venue {} was successfully listed!", venue.name);
    Ok(created(venue, message))
}

pub async fn edit_venue(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
) -> Result<Response, AppError> {
    let venue = state
        .store
        .get_venue(venue_id)
        .await?
        .ok_or_else(|| venue_not_found(venue_id))?;
    Ok(page(FormPage::prefilled(VENUE_FORM, venue)))
}

pub async fn edit_venue_submission(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
    submitted: Result<Submitted, AppError>,
) -> Result<Redirect, AppError> {
    if state.store.get_venue(venue_id).await?.is_none() {
        return Err(venue_not_found(venue_id));
    }
    let Submitted(form) = submitted?;
    let fields = forms::venue_fields(&form)?;

    match state.store.update_venue(venue_id, fields).await {
        Ok(Some(_)) => {
            tracing::info!(venue_id, "Venue updated");
            Ok(Redirect::to(&format!("/venues/{venue_id}")))
        }
        Ok(None) => Err(venue_not_found(venue_id)),
        Err(e) => {
            tracing::error!(venue_id, error = %e, "Venue update rolled back");
            Err(e.into())
        }
    }
}

pub async fn delete_venue(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
) -> Result<Response, AppError> {
    if !state.store.delete_venue(venue_id).await? {
        return Err(venue_not_found(venue_id));
    }
    tracing::info!(venue_id, "Venue deleted with its shows");
    Ok(Redirect::to("/venues").into_response())
}
