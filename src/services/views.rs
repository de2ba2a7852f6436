//! Assembly of aggregate views from their rows.

use sea_orm::ConnectionTrait;

use crate::{
    db::{
        entities::{artist, event, image, location, project},
        repositories::{ArtistRepository, ImageRepository, LocationRepository, ProjectRepository},
    },
    error::{AppError, Result},
    models::{ArtistDetails, ArtistSummary, EventDetails, ProjectDetails, ProjectSummary},
};

async fn owned_image<C: ConnectionTrait>(db: &C, id: uuid::Uuid, owner: &str) -> Result<image::Model> {
    ImageRepository::new(db)
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Image {} of {} is missing", id, owner)))
}

async fn owned_location<C: ConnectionTrait>(
    db: &C,
    id: uuid::Uuid,
    owner: &str,
) -> Result<location::Model> {
    LocationRepository::new(db)
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Location {} of {} is missing", id, owner)))
}

pub(crate) async fn artist_summary<C: ConnectionTrait>(
    db: &C,
    artist: artist::Model,
) -> Result<ArtistSummary> {
    let image = owned_image(db, artist.image_id, &format!("artist {}", artist.id)).await?;
    Ok(ArtistSummary { artist, image })
}

pub(crate) async fn project_summary<C: ConnectionTrait>(
    db: &C,
    project: project::Model,
) -> Result<ProjectSummary> {
    let owner = format!("project {}", project.id);
    let image = owned_image(db, project.image_id, &owner).await?;
    let location = owned_location(db, project.location_id, &owner).await?;
    Ok(ProjectSummary {
        project,
        image,
        location,
    })
}

pub(crate) async fn artist_details<C: ConnectionTrait>(
    db: &C,
    artist: artist::Model,
) -> Result<ArtistDetails> {
    let mut projects = Vec::new();
    for project in ArtistRepository::new(db).find_projects(artist.id).await? {
        projects.push(project_summary(db, project).await?);
    }

    let ArtistSummary { artist, image } = artist_summary(db, artist).await?;
    Ok(ArtistDetails {
        artist,
        image,
        projects,
    })
}

pub(crate) async fn project_details<C: ConnectionTrait>(
    db: &C,
    project: project::Model,
) -> Result<ProjectDetails> {
    let mut artists = Vec::new();
    for artist in ProjectRepository::new(db).find_artists(project.id).await? {
        artists.push(artist_summary(db, artist).await?);
    }

    let ProjectSummary {
        project,
        image,
        location,
    } = project_summary(db, project).await?;
    Ok(ProjectDetails {
        project,
        image,
        location,
        artists,
    })
}

pub(crate) async fn event_details<C: ConnectionTrait>(
    db: &C,
    event: event::Model,
) -> Result<EventDetails> {
    let owner = format!("event {}", event.id);
    let image = owned_image(db, event.image_id, &owner).await?;
    let location = owned_location(db, event.location_id, &owner).await?;
    Ok(EventDetails {
        event,
        image,
        location,
    })
}
