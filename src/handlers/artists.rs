use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::CountResponse;
use crate::{
    dto::{ArtistExportDto, ArtistImportDto},
    error::{AppError, Result},
    extractors::AppJson,
    models::{ArtistData, NewArtistWithProject},
    services::ArtistService,
    state::AppState,
};

pub async fn list_artists(State(state): State<AppState>) -> Result<Json<Vec<ArtistExportDto>>> {
    let artists = ArtistService::new(state.db.clone()).find_all().await?;
    Ok(Json(artists.into_iter().map(Into::into).collect()))
}

pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ArtistExportDto>> {
    let artist = ArtistService::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Artist", id))?;
    Ok(Json(artist.into()))
}

pub async fn find_artists_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ArtistExportDto>>> {
    let artists = ArtistService::new(state.db.clone())
        .find_by_name(&name)
        .await?;
    Ok(Json(artists.into_iter().map(Into::into).collect()))
}

pub async fn count_artists(State(state): State<AppState>) -> Result<Json<CountResponse>> {
    let count = ArtistService::new(state.db.clone()).count().await?;
    Ok(Json(CountResponse { count }))
}

/// Creates the artist together with a new project, or links it to the
/// existing projects matching the nested project when `is_project_existing`
/// is set.
pub async fn create_artist(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ArtistImportDto>,
) -> Result<(StatusCode, Json<ArtistExportDto>)> {
    let request = NewArtistWithProject::try_from(payload)?;
    let created = ArtistService::new(state.db.clone())
        .create_with_project(request)
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn update_artist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<ArtistImportDto>,
) -> Result<Json<ArtistExportDto>> {
    let data = ArtistData::try_from(payload)?;
    let updated = ArtistService::new(state.db.clone()).update(id, data).await?;
    Ok(Json(updated.into()))
}

pub async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let summary = ArtistService::new(state.db.clone()).delete(id).await?;
    tracing::debug!(
        "DELETE /artists/{} removed projects {:?}",
        id,
        summary.projects
    );
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_projects(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(project_ids): AppJson<Vec<Uuid>>,
) -> Result<StatusCode> {
    ArtistService::new(state.db.clone())
        .add_projects(id, &project_ids)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
