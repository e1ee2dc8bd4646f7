use axum::extract::State;
use axum::response::Response;

use crate::directory;
use crate::extract::Submitted;
use crate::forms::{self, FormPage, SHOW_FORM};
use crate::models::Show;
use crate::utils::error::AppError;
use crate::utils::response::{created, page};
use crate::AppState;

pub async fn list_shows(State(state): State<AppState>) -> Result<Response, AppError> {
    let rows = directory::show_rows(state.store.as_ref()).await?;
    Ok(page(rows))
}

pub async fn create_show_form() -> Response {
    page(FormPage::<Show>::blank(SHOW_FORM))
}

pub async fn create_show_submission(
    State(state): State<AppState>,
    submitted: Result<Submitted, AppError>,
) -> Result<Response, AppError> {
    let Submitted(form) = submitted.map_err(|e| AppError::not_listed("Show", "", e))?;

    let show = forms::new_show(&form).map_err(|e| AppError::not_listed("Show", "", e))?;
    let show = state
        .store
        .create_show(show)
        .await
        .map_err(|e| AppError::not_listed("Show", "", e.into()))?;

    tracing::info!(
        show_id = show.id,
        artist_id = show.artist_id,
        venue_id = show.venue_id,
        "Show listed"
    );
    Ok(created(show, "Show was successfully listed!"))
}
