use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::CountResponse;
use crate::{
    dto::ImageDto,
    error::{AppError, Result},
    extractors::AppJson,
    models::NewImage,
    services::ImageService,
    state::AppState,
};

pub async fn list_images(State(state): State<AppState>) -> Result<Json<Vec<ImageDto>>> {
    let images = ImageService::new(state.db.clone()).find_all().await?;
    Ok(Json(images.into_iter().map(Into::into).collect()))
}

pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ImageDto>> {
    let image = ImageService::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Image", id))?;
    Ok(Json(image.into()))
}

pub async fn count_images(State(state): State<AppState>) -> Result<Json<CountResponse>> {
    let count = ImageService::new(state.db.clone()).count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn create_image(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ImageDto>,
) -> Result<(StatusCode, Json<ImageDto>)> {
    let image = NewImage::try_from(payload)?;
    let created = ImageService::new(state.db.clone()).create(image).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn update_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<ImageDto>,
) -> Result<Json<ImageDto>> {
    let image = NewImage::try_from(payload)?;
    let updated = ImageService::new(state.db.clone()).update(id, image).await?;
    Ok(Json(updated.into()))
}

/// Fails with an integrity violation while an artist, project or event still
/// owns the image.
pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    ImageService::new(state.db.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
