use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, Config, SecurityHeaders};
use crate::handlers::{self, artists, shows, venues};
use crate::AppState;

pub fn create_routes(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health_check))
        .route("/venues", get(venues::list_venues))
        .route(
            "/venues/search",
            get(venues::search_venues).post(venues::search_venues_submission),
        )
        .route(
            "/venues/create",
            get(venues::create_venue_form).post(venues::create_venue_submission),
        )
        .route("/venues/:venue_id", get(venues::show_venue))
        .route(
            "/venues/:venue_id/edit",
            get(venues::edit_venue).post(venues::edit_venue_submission),
        )
        .route("/venues/:venue_id/delete", delete(venues::delete_venue))
        .route("/artists", get(artists::list_artists))
        .route(
            "/artists/search",
            get(artists::search_artists).post(artists::search_artists_submission),
        )
        .route(
            "/artists/create",
            get(artists::create_artist_form).post(artists::create_artist_submission),
        )
        .route("/artists/:artist_id", get(artists::show_artist))
        .route(
            "/artists/:artist_id/edit",
            get(artists::edit_artist).post(artists::edit_artist_submission),
        )
        .route("/artists/:artist_id/delete", delete(artists::delete_artist))
        .route("/shows", get(shows::list_shows))
        .route(
            "/shows/create",
            get(shows::create_show_form).post(shows::create_show_submission),
        )
        .fallback(handlers::not_found)
        .with_state(state);

    apply_middleware(router, config)
}

/// Panics are caught innermost; the 500 passes through every other layer.
fn apply_middleware(router: Router, config: &Config) -> Router {
    let router = router.layer(CatchPanicLayer::custom(handlers::panic_response));
    SecurityHeaders::new(config.production)
        .apply(router)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("handler blew up")
    }

    #[tokio::test]
    async fn test_panic_response_keeps_security_headers() {
        let router = Router::new().route("/explode", get(explode));
        let app = apply_middleware(router, &Config::default());

        let response = app
            .oneshot(Request::builder().uri("/explode").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let headers = response.headers();
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "DENY");
    }
}
