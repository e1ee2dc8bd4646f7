use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;

use super::venues::SearchQuery;
use crate::directory;
use crate::extract::{RecordId, Submitted};
use crate::forms::{self, FormPage, ARTIST_FORM};
use crate::models::Artist;
use crate::utils::error::AppError;
use crate::utils::response::{created, page};
use crate::views::SearchPage;
use crate::AppState;

fn artist_not_found(artist_id: i64) -> AppError {
    AppError::NotFound(format!("Artist with id '{artist_id}' was not found"))
}

pub async fn list_artists(State(state): State<AppState>) -> Result<Response, AppError> {
    let artists = directory::artist_entries(state.store.as_ref()).await?;
    Ok(page(artists))
}

async fn search(state: &AppState, search_term: String) -> Result<Response, AppError> {
    let results =
        directory::search_artists(state.store.as_ref(), &search_term, Utc::now()).await?;
    Ok(page(SearchPage {
        search_term,
        results,
    }))
}

pub async fn search_artists(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    search(&state, query.search_term).await
}

pub async fn search_artists_submission(
    State(state): State<AppState>,
    Submitted(form): Submitted,
) -> Result<Response, AppError> {
    search(&state, form.value("search_term").unwrap_or_default().to_string()).await
}

pub async fn show_artist(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
) -> Result<Response, AppError> {
    let detail = directory::artist_detail(state.store.as_ref(), artist_id, Utc::now()).await?;
    Ok(page(detail))
}

pub async fn create_artist_form() -> Response {
    page(FormPage::<Artist>::blank(ARTIST_FORM))
}

pub async fn create_artist_submission(
    State(state): State<AppState>,
    submitted: Result<Submitted, AppError>,
) -> Result<Response, AppError> {
    let Submitted(form) = submitted.map_err(|e| AppError::not_listed("Artist", "", e))?;
    let name = form.name();

    let fields = forms::artist_fields(&form).map_err(|e| AppError::not_listed("Artist", &name, e))?;
    let artist = state
        .store
        .create_artist(fields)
        .await
        .map_err(|e| AppError::not_listed("Artist", &name, e.into()))?;

    tracing::info!(artist_id = artist.id, name = %artist.name, "Artist listed");
    let message = format!("Artist {} was successfully listed!", artist.name);
    Ok(created(artist, message))
}

pub async fn edit_artist(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
) -> Result<Response, AppError> {
    let artist = state
        .store
        .get_artist(artist_id)
        .await?
        .ok_or_else(|| artist_not_found(artist_id))?;
    Ok(page(FormPage::prefilled(ARTIST_FORM, artist)))
}

pub async fn edit_artist_submission(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
    submitted: Result<Submitted, AppError>,
) -> Result<Redirect, AppError> {
    if state.store.get_artist(artist_id).await?.is_none() {
        return Err(artist_not_found(artist_id));
    }
    let Submitted(form) = submitted?;
    let fields = forms::artist_fields(&form)?;

    let updated = state
        .store
        .update_artist(artist_id, fields)
        .await
        .map_err(|e| {
            tracing::error!(artist_id, error = %e, "Artist update rolled back");
            AppError::from(e)
        })?;

    if updated.is_none() {
        return Err(artist_not_found(artist_id));
    }
    tracing::info!(artist_id, "Artist updated");
    Ok(Redirect::to(&format!("/artists/{artist_id}")))
}

pub async fn delete_artist(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
) -> Result<Response, AppError> {
    if !state.store.delete_artist(artist_id).await? {
        return Err(artist_not_found(artist_id));
    }
    tracing::info!(artist_id, "Artist deleted with its shows");
    Ok(Redirect::to("/artists").into_response())
}
