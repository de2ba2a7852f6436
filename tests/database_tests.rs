//! Database integration tests
//!
//! Tests the schema directly to ensure:
//! - Entities can be created with all required fields
//! - Foreign key and unique constraints hold
//! - Join rows cascade with their artist or project
//! - The many-to-many relation resolves through the join table

use pretty_assertions::assert_eq;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, PaginatorTrait, Set};
use uuid::Uuid;

use trails_catalog::db::entities::{artist, artist_project, image, project, ArtistProject, Image};
use trails_catalog::error::AppError;
use trails_catalog::test_utils::*;

async fn insert_image(db: &sea_orm::DatabaseConnection) -> image::Model {
    image::ActiveModel {
        id: Set(Uuid::new_v4()),
        mimetype: Set("image/png".to_string()),
        data: Set(vec![1, 2, 3]),
    }
    .insert(db)
    .await
    .expect("Should insert image")
}

fn artist_row(image_id: Uuid) -> artist::ActiveModel {
    artist::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Raw Artist".to_string()),
        description: Set(String::new()),
        instagram_url: Set(String::new()),
        image_id: Set(image_id),
    }
}

#[tokio::test]
async fn test_create_image() {
    let db = setup_test_db().await;

    let image = insert_image(&db).await;
    let stored = Image::find_by_id(image.id).one(&db).await.unwrap().unwrap();

    assert_eq!(stored.mimetype, "image/png");
    assert_eq!(stored.data, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_artist_requires_valid_image() {
    let db = setup_test_db().await;

    let result = artist_row(Uuid::new_v4()).insert(&db).await;

    assert!(result.is_err(), "Should fail to create artist with invalid image_id");
}

#[tokio::test]
async fn test_image_cannot_be_shared() {
    let db = setup_test_db().await;
    let image = insert_image(&db).await;
    artist_row(image.id).insert(&db).await.expect("Should insert artist");

    let err = artist_row(image.id).insert(&db).await.unwrap_err();

    assert!(matches!(AppError::from(err), AppError::IntegrityViolation(_)));
}

#[tokio::test]
async fn test_owned_image_cannot_be_deleted() {
    let db = setup_test_db().await;
    let image = insert_image(&db).await;
    artist_row(image.id).insert(&db).await.expect("Should insert artist");

    let result = Image::delete_by_id(image.id).exec(&db).await;

    assert!(result.is_err(), "Image owned by an artist must not be deletable");
    assert_eq!(Image::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_link_rejected() {
    let db = setup_test_db().await;
    let artist = create_test_artist(&db, "Ana").await;
    let project = create_test_project(&db, "Harbour Mural", "Harbour").await;

    let link = || artist_project::ActiveModel {
        id: Set(Uuid::new_v4()),
        artist_id: Set(artist.artist.id),
        project_id: Set(project.project.id),
    };
    link().insert(&db).await.expect("Should insert link");
    let err = link().insert(&db).await.unwrap_err();

    assert!(matches!(AppError::from(err), AppError::IntegrityViolation(_)));
}

#[tokio::test]
async fn test_links_cascade_delete_with_artist() {
    let db = setup_test_db().await;
    let details = create_test_artist_with_project(&db, "Ana", "Harbour Mural", "Harbour").await;
    assert_eq!(ArtistProject::find().count(&db).await.unwrap(), 1);

    details
        .artist
        .clone()
        .delete(&db)
        .await
        .expect("Should delete artist");

    assert_eq!(ArtistProject::find().count(&db).await.unwrap(), 0);
    // the project row itself is untouched by the schema
    assert_eq!(project::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_many_to_many_through_join_table() {
    let db = setup_test_db().await;
    let details = create_test_artist_with_project(&db, "Ana", "Harbour Mural", "Harbour").await;

    let projects = details
        .artist
        .find_related(project::Entity)
        .all(&db)
        .await
        .expect("Query should succeed");
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "Harbour Mural");

    let artists = projects[0]
        .find_related(artist::Entity)
        .all(&db)
        .await
        .expect("Query should succeed");
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0].id, details.artist.id);
}

#[tokio::test]
async fn test_parallel_database_isolation() {
    let (db1, db2) = tokio::join!(setup_test_db(), setup_test_db());

    create_test_event(&db1, "Opening").await;

    let events1 = trails_catalog::db::entities::Event::find().count(&db1).await.unwrap();
    let events2 = trails_catalog::db::entities::Event::find().count(&db2).await.unwrap();
    assert_eq!(events1, 1);
    assert_eq!(events2, 0);
}
