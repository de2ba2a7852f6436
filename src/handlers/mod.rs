pub mod artists;
pub mod events;
pub mod health;
pub mod images;
pub mod locations;
pub mod projects;

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    config::Config,
    error::{AppError, Result},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

/// CORS for the frontend: the configured origin, or any origin when unset.
pub fn cors_layer(config: &Config) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match &config.cors_allowed_origin {
        Some(origin) => {
            let origin: HeaderValue = origin.parse().map_err(|_| {
                AppError::Configuration(format!(
                    "CORS_ALLOWED_ORIGIN is not a valid origin: {}",
                    origin
                ))
            })?;
            tracing::info!("CORS restricted to {:?}", origin);
            Ok(layer.allow_origin(origin))
        }
        None => Ok(layer.allow_origin(Any)),
    }
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Image endpoints
        .route("/images", get(images::list_images).post(images::create_image))
        .route("/images/count", get(images::count_images))
        .route(
            "/images/:id",
            get(images::get_image)
                .put(images::update_image)
                .delete(images::delete_image),
        )

        // Location endpoints
        .route(
            "/locations",
            get(locations::list_locations).post(locations::create_location),
        )
        .route("/locations/count", get(locations::count_locations))
        .route("/locations/name/:name", get(locations::find_locations_by_name))
        .route(
            "/locations/:id",
            get(locations::get_location)
                .put(locations::update_location)
                .delete(locations::delete_location),
        )

        // Artist endpoints
        .route("/artists", get(artists::list_artists).post(artists::create_artist))
        .route("/artists/count", get(artists::count_artists))
        .route("/artists/name/:name", get(artists::find_artists_by_name))
        .route(
            "/artists/:id",
            get(artists::get_artist)
                .put(artists::update_artist)
                .delete(artists::delete_artist),
        )
        .route("/artists/:id/projects", post(artists::add_projects))

        // Project endpoints
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/projects/count", get(projects::count_projects))
        .route("/projects/name/:name", get(projects::find_projects_by_name))
        .route(
            "/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/projects/:id/artists", post(projects::add_new_artist))
        .route(
            "/projects/:id/artists/:artist_id",
            put(projects::add_existing_artist).delete(projects::remove_artist),
        )

        // Event endpoints
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/count", get(events::count_events))
        .route("/events/name/:name", get(events::find_events_by_name))
        .route(
            "/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_config;

    #[test]
    fn test_cors_layer_defaults_to_any_origin() {
        assert!(cors_layer(&test_config()).is_ok());
    }

    #[test]
    fn test_cors_layer_accepts_configured_origin() {
        let config = Config {
            cors_allowed_origin: Some("https://trails.example.org".to_string()),
            ..test_config()
        };
        assert!(cors_layer(&config).is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        let config = Config {
            cors_allowed_origin: Some("bad\norigin".to_string()),
            ..test_config()
        };
        assert!(matches!(
            cors_layer(&config),
            Err(AppError::Configuration(_))
        ));
    }
}
