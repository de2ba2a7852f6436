//! Integration tests for project handler routes
//!
//! Tests the project API endpoints including:
//! - Create with a new or an existing artist
//! - Update and delete with orphan cleanup
//! - Adding new and existing artists, removing artists

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;
use uuid::Uuid;

use trails_catalog::handlers;
use trails_catalog::state::AppState;
use trails_catalog::test_utils::*;

fn create_test_router(state: &AppState) -> Router {
    Router::new()
        .nest("/api", handlers::api_routes())
        .with_state(state.clone())
}

async fn parse_json_response<T: serde::de::DeserializeOwned>(
    response: axum::response::Response,
) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn project_payload(name: &str, artist: Value, is_artist_existing: bool) -> Value {
    json!({
        "name": name,
        "location": { "name": "Station", "map_address": "Platform 2" },
        "image": { "mimetype": "image/png", "data": "iVBORw==" },
        "youtube_url": "https://youtu.be/wall",
        "artist": artist,
        "is_artist_existing": is_artist_existing
    })
}

fn artist_json(name: &str) -> Value {
    json!({
        "name": name,
        "image": { "mimetype": "image/png", "data": "iVBORw==" },
        "description": "Muralist",
        "instagram_url": format!("https://instagram.com/{}", name)
    })
}

#[tokio::test]
async fn test_create_project_with_new_artist() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(request(
            "POST",
            "/api/projects",
            Some(project_payload("Station Wall", artist_json("dana"), false)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = parse_json_response(response).await;
    assert_eq!(body["name"], "Station Wall");
    assert_eq!(body["location"]["name"], "Station");
    assert_eq!(body["youtube_url"], "https://youtu.be/wall");
    let artists = body["artists"].as_array().unwrap();
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0]["name"], "dana");
}

#[tokio::test]
async fn test_create_project_with_existing_artist() {
    let state = setup_test_app_state().await;
    let ana = create_test_artist_with_project(&state.db, "Ana", "Harbour Mural", "Harbour").await;
    let app = create_test_router(&state);

    let existing = json!({
        "name": "Ana",
        "instagram_url": ana.artist.instagram_url
    });
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/projects",
            Some(project_payload("Station Wall", existing, true)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = parse_json_response(response).await;
    assert_eq!(body["artists"][0]["id"], ana.artist.id.to_string());

    let response = app
        .oneshot(request("GET", &format!("/api/artists/{}", ana.artist.id), None))
        .await
        .unwrap();
    let artist: Value = parse_json_response(response).await;
    assert_eq!(artist["projects"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_project_missing_location_is_rejected() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let mut payload = project_payload("Station Wall", artist_json("dana"), false);
    payload["location"] = Value::Null;

    let response = app
        .oneshot(request("POST", "/api/projects", Some(payload)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_project_keeps_created_on() {
    let state = setup_test_app_state().await;
    let project = create_test_project(&state.db, "Harbour Mural", "Harbour").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(request(
            "PUT",
            &format!("/api/projects/{}", project.project.id),
            Some(project_payload("Harbour Mural II", Value::Null, false)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = parse_json_response(response).await;
    assert_eq!(body["name"], "Harbour Mural II");
    assert_eq!(body["location"]["name"], "Station");
    assert_eq!(body["location"]["id"], project.location.id.to_string());

    let created_on = chrono::DateTime::parse_from_rfc3339(body["created_on"].as_str().unwrap())
        .unwrap();
    assert_eq!(created_on, project.project.created_on);
}

#[tokio::test]
async fn test_delete_project_removes_orphaned_artist() {
    let state = setup_test_app_state().await;
    let ana = create_test_artist_with_project(&state.db, "Ana", "Harbour Mural", "Harbour").await;
    let app = create_test_router(&state);

    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/projects/{}", ana.projects[0].project.id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(request("GET", &format!("/api/artists/{}", ana.artist.id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(request("GET", "/api/locations/count", None))
        .await
        .unwrap();
    let count: Value = parse_json_response(response).await;
    assert_eq!(count["count"], 0);
}

#[tokio::test]
async fn test_add_new_artist_to_project() {
    let state = setup_test_app_state().await;
    let project = create_test_project(&state.db, "Harbour Mural", "Harbour").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(request(
            "POST",
            &format!("/api/projects/{}/artists", project.project.id),
            Some(artist_json("eli")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = parse_json_response(response).await;
    assert_eq!(body["name"], "eli");
    assert_eq!(body["projects"][0]["id"], project.project.id.to_string());
}

#[tokio::test]
async fn test_add_existing_artist_twice_keeps_one_link() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Ana").await;
    let project = create_test_project(&state.db, "Harbour Mural", "Harbour").await;
    let app = create_test_router(&state);
    let uri = format!(
        "/api/projects/{}/artists/{}",
        project.project.id, artist.artist.id
    );

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(request("PUT", &uri, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/projects/{}", project.project.id),
            None,
        ))
        .await
        .unwrap();
    let body: Value = parse_json_response(response).await;
    assert_eq!(body["artists"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_add_existing_artist_unknown_artist() {
    let state = setup_test_app_state().await;
    let project = create_test_project(&state.db, "Harbour Mural", "Harbour").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(request(
            "PUT",
            &format!(
                "/api/projects/{}/artists/{}",
                project.project.id,
                Uuid::new_v4()
            ),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_artist_from_project() {
    let state = setup_test_app_state().await;
    let ana = create_test_artist_with_project(&state.db, "Ana", "Harbour Mural", "Harbour").await;
    let project_id = ana.projects[0].project.id;
    let app = create_test_router(&state);

    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/projects/{}/artists/{}", project_id, ana.artist.id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Ana was the only artist, so both sides are gone
    for uri in [
        format!("/api/artists/{}", ana.artist.id),
        format!("/api/projects/{}", project_id),
    ] {
        let response = app
            .clone()
            .oneshot(request("GET", &uri, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
