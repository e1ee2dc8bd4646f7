//! Venue, artist and show booking directory served over HTTP.

use std::sync::Arc;

pub mod config;
pub mod db;
pub mod directory;
pub mod extract;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod utils;
pub mod views;

use db::Store;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}
