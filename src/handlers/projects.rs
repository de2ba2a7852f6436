use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::CountResponse;
use crate::{
    dto::{ArtistDataDto, ArtistExportDto, ProjectExportDto, ProjectImportDto},
    error::{AppError, Result},
    extractors::AppJson,
    models::{ArtistData, NewProjectWithArtist, ProjectData},
    services::ProjectService,
    state::AppState,
};

pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<ProjectExportDto>>> {
    let projects = ProjectService::new(state.db.clone()).find_all().await?;
    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectExportDto>> {
    let project = ProjectService::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;
    Ok(Json(project.into()))
}

pub async fn find_projects_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ProjectExportDto>>> {
    let projects = ProjectService::new(state.db.clone())
        .find_by_name(&name)
        .await?;
    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

pub async fn count_projects(State(state): State<AppState>) -> Result<Json<CountResponse>> {
    let count = ProjectService::new(state.db.clone()).count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn create_project(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ProjectImportDto>,
) -> Result<(StatusCode, Json<ProjectExportDto>)> {
    let request = NewProjectWithArtist::try_from(payload)?;
    let created = ProjectService::new(state.db.clone())
        .create_with_artist(request)
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<ProjectImportDto>,
) -> Result<Json<ProjectExportDto>> {
    let data = ProjectData::try_from(payload)?;
    let updated = ProjectService::new(state.db.clone()).update(id, data).await?;
    Ok(Json(updated.into()))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let summary = ProjectService::new(state.db.clone()).delete(id).await?;
    tracing::debug!(
        "DELETE /projects/{} removed artists {:?}",
        id,
        summary.artists
    );
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_new_artist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<ArtistDataDto>,
) -> Result<(StatusCode, Json<ArtistExportDto>)> {
    let data = ArtistData::try_from(payload)?;
    let created = ProjectService::new(state.db.clone())
        .add_new_artist(id, data)
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn add_existing_artist(
    State(state): State<AppState>,
    Path((id, artist_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode> {
    ProjectService::new(state.db.clone())
        .add_existing_artist(id, artist_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Severs the link and deletes the artist, which in turn deletes any project
/// left without artists.
pub async fn remove_artist(
    State(state): State<AppState>,
    Path((id, artist_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode> {
    ProjectService::new(state.db.clone())
        .remove_artist(id, artist_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
