//! Test utilities for Trails Catalog
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - AppState factories
//! - Test data generators

use chrono::{NaiveDate, NaiveDateTime};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

use crate::{
    config::Config,
    models::{
        ArtistData, ArtistDetails, EventData, EventDetails, NewArtistWithProject, NewImage,
        NewLocation, ProjectData, ProjectDetails, ProjectSpec, TimeRange,
    },
    services::{ArtistService, AssociationManager, EventService, ProjectService},
    state::AppState,
};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database perfect for parallel testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test configuration with sensible defaults
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 3000,
        cors_allowed_origin: None,
    }
}

/// Create a complete test AppState with an isolated database
pub async fn setup_test_app_state() -> AppState {
    let db = setup_test_db().await;
    AppState::new(db, test_config())
}

/// A tiny PNG header, enough to exercise blob storage.
pub fn sample_image() -> NewImage {
    NewImage::new("image/png", vec![137, 80, 78, 71, 13, 10, 26, 10])
        .expect("valid sample image")
}

pub fn sample_location(name: &str) -> NewLocation {
    NewLocation::new(name, Some(format!("{} 1, Trail Town", name))).expect("valid sample location")
}

pub fn sample_artist(name: &str) -> ArtistData {
    ArtistData::new(
        name,
        Some(format!("{} paints walls", name)),
        Some(format!("https://instagram.com/{}", name.to_lowercase().replace(' ', "_"))),
        sample_image(),
    )
    .expect("valid sample artist")
}

pub fn sample_project(name: &str, location: &str) -> ProjectData {
    ProjectData::new(
        name,
        Some("https://youtube.com/watch?v=trail".to_string()),
        sample_image(),
        sample_location(location),
    )
    .expect("valid sample project")
}

pub fn sample_event(name: &str, start_hour: u32, end_hour: u32) -> EventData {
    EventData::new(
        name,
        None,
        sample_image(),
        sample_location("Gallery"),
        TimeRange::new(at_hour(start_hour), at_hour(end_hour)).expect("valid sample range"),
    )
    .expect("valid sample event")
}

/// 1 May 2025 at the given hour.
pub fn at_hour(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 1)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .expect("valid test timestamp")
}

/// Create an artist with no projects
pub async fn create_test_artist(db: &DatabaseConnection, name: &str) -> ArtistDetails {
    ArtistService::new(db.clone())
        .create(sample_artist(name))
        .await
        .expect("Failed to insert test artist")
}

/// Create a project with no artists
pub async fn create_test_project(
    db: &DatabaseConnection,
    name: &str,
    location: &str,
) -> ProjectDetails {
    ProjectService::new(db.clone())
        .create(sample_project(name, location))
        .await
        .expect("Failed to insert test project")
}

/// Create an artist linked to a freshly created project
pub async fn create_test_artist_with_project(
    db: &DatabaseConnection,
    artist: &str,
    project: &str,
    location: &str,
) -> ArtistDetails {
    AssociationManager::new(db.clone())
        .create_artist_with_project(NewArtistWithProject {
            artist: sample_artist(artist),
            project: ProjectSpec::New(sample_project(project, location)),
        })
        .await
        .expect("Failed to insert test artist with project")
}

pub async fn create_test_event(db: &DatabaseConnection, name: &str) -> EventDetails {
    EventService::new(db.clone())
        .create(sample_event(name, 18, 22))
        .await
        .expect("Failed to insert test event")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entities::{ArtistProject, Image};
    use sea_orm::{EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        let images = Image::find().all(&db).await.unwrap();
        assert_eq!(images.len(), 0);
    }

    #[tokio::test]
    async fn test_create_test_artist_with_project() {
        let db = setup_test_db().await;
        let artist = create_test_artist_with_project(&db, "Ana", "Mural", "Harbour").await;

        assert_eq!(artist.artist.name, "Ana");
        assert_eq!(artist.projects.len(), 1);
        assert_eq!(artist.projects[0].location.name, "Harbour");
        assert_eq!(ArtistProject::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_parallel_databases() {
        // Run two database setups in parallel - they should not interfere
        let (db1, db2) = tokio::join!(setup_test_db(), setup_test_db());

        create_test_artist(&db1, "Artist 1").await;
        create_test_artist(&db2, "Artist 2").await;

        let db1_images = Image::find().count(&db1).await.unwrap();
        let db2_images = Image::find().count(&db2).await.unwrap();
        assert_eq!(db1_images, 1);
        assert_eq!(db2_images, 1);
    }
}
