use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::CountResponse;
use crate::{
    dto::EventDto,
    error::{AppError, Result},
    extractors::AppJson,
    models::EventData,
    services::EventService,
    state::AppState,
};

pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<EventDto>>> {
    let events = EventService::new(state.db.clone()).find_all().await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventDto>> {
    let event = EventService::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;
    Ok(Json(event.into()))
}

pub async fn find_events_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<EventDto>>> {
    let events = EventService::new(state.db.clone())
        .find_by_name(&name)
        .await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

pub async fn count_events(State(state): State<AppState>) -> Result<Json<CountResponse>> {
    let count = EventService::new(state.db.clone()).count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn create_event(
    State(state): State<AppState>,
    AppJson(payload): AppJson<EventDto>,
) -> Result<(StatusCode, Json<EventDto>)> {
    let data = EventData::try_from(payload)?;
    let created = EventService::new(state.db.clone()).create(data).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<EventDto>,
) -> Result<Json<EventDto>> {
    let data = EventData::try_from(payload)?;
    let updated = EventService::new(state.db.clone()).update(id, data).await?;
    Ok(Json(updated.into()))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    EventService::new(state.db.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
