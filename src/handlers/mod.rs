use std::any::Any;

use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::utils::error::AppError;
use crate::utils::response::success;

pub mod artists;
pub mod shows;
pub mod venues;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

#[derive(Serialize)]
struct HomePayload {
    service: &'static str,
    venues: &'static str,
    artists: &'static str,
    shows: &'static str,
}

pub async fn home() -> Response {
    let payload = HomePayload {
        service: "showbook",
        venues: "/venues",
        artists: "/artists",
        shows: "/shows",
    };

    success(payload, "Welcome to the booking directory")
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "showbook-api",
    };

    success(payload, "Health check successful")
}

pub async fn not_found(uri: Uri) -> Response {
    AppError::NotFound(format!("No page at '{}'", uri.path())).into_response()
}

/// Turns a handler panic into the 500 page.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");

    AppError::InternalServerError("Internal server error".to_string()).into_response()
}
