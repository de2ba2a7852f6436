use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::CountResponse;
use crate::{
    dto::LocationDto,
    error::{AppError, Result},
    extractors::AppJson,
    models::NewLocation,
    services::LocationService,
    state::AppState,
};

pub async fn list_locations(State(state): State<AppState>) -> Result<Json<Vec<LocationDto>>> {
    let locations = LocationService::new(state.db.clone()).find_all().await?;
    Ok(Json(locations.into_iter().map(Into::into).collect()))
}

pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LocationDto>> {
    let location = LocationService::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Location", id))?;
    Ok(Json(location.into()))
}

pub async fn find_locations_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<LocationDto>>> {
    let locations = LocationService::new(state.db.clone())
        .find_by_name(&name)
        .await?;
    Ok(Json(locations.into_iter().map(Into::into).collect()))
}

pub async fn count_locations(State(state): State<AppState>) -> Result<Json<CountResponse>> {
    let count = LocationService::new(state.db.clone()).count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn create_location(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LocationDto>,
) -> Result<(StatusCode, Json<LocationDto>)> {
    let location = NewLocation::try_from(payload)?;
    let created = LocationService::new(state.db.clone()).create(location).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<LocationDto>,
) -> Result<Json<LocationDto>> {
    let location = NewLocation::try_from(payload)?;
    let updated = LocationService::new(state.db.clone())
        .update(id, location)
        .await?;
    Ok(Json(updated.into()))
}

pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    LocationService::new(state.db.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
