//! Integration tests for the image and location stores and the health check

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
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
        .route("/health", get(handlers::health::health_check))
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

#[tokio::test]
async fn test_health_check() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app.oneshot(request("GET", "/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = parse_json_response(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_image_crud() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/images",
            Some(json!({ "mimetype": "image/png", "data": "iVBORw==" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = parse_json_response(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/images/{}", id),
            Some(json!({ "mimetype": "image/gif", "data": "R0lG" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = parse_json_response(response).await;
    assert_eq!(updated["id"], id);
    assert_eq!(updated["data"], "R0lG");

    let response = app
        .clone()
        .oneshot(request("DELETE", &format!("/api/images/{}", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(request("GET", &format!("/api/images/{}", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_image_with_invalid_base64_is_rejected() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(request(
            "POST",
            "/api/images",
            Some(json!({ "mimetype": "image/png", "data": "not base64!" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_unknown_image() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(request(
            "DELETE",
            &format!("/api/images/{}", Uuid::new_v4()),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_location_crud_and_search() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/locations",
            Some(json!({ "name": "Old Harbour" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = parse_json_response(response).await;
    assert_eq!(created["map_address"], "");
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request("GET", "/api/locations/name/harb", None))
        .await
        .unwrap();
    let found: Value = parse_json_response(response).await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/locations/{}", id),
            Some(json!({ "name": "New Harbour", "map_address": "Quay 9" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = parse_json_response(response).await;
    assert_eq!(updated["name"], "New Harbour");
    assert_eq!(updated["map_address"], "Quay 9");

    let response = app
        .oneshot(request("DELETE", &format!("/api/locations/{}", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_location_requires_name() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(request(
            "POST",
            "/api/locations",
            Some(json!({ "map_address": "Quay 9" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_owned_location_cannot_be_deleted_directly() {
    let state = setup_test_app_state().await;
    let project = create_test_project(&state.db, "Harbour Mural", "Harbour").await;
    let app = create_test_router(&state);

    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/locations/{}", project.location.id),
            None,
        ))
        .await
        .unwrap();
    assert_ne!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/locations/{}", project.location.id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
