//! Artist/project association manager.
//!
//! Every public operation runs in one database transaction: the transaction
//! is committed only after all rows of the operation are written, and an
//! early return drops it, which rolls everything back. Links live only in
//! the `artist_projects` join table, so both directions of the relation are
//! always read from the same rows.
//!
//! Orphan cleanup after a delete is single-level: removing an orphaned
//! project does not trigger a second scan for artists.

use std::collections::HashSet;

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use super::{
    artists::insert_artist,
    projects::insert_project,
    views::{artist_details, project_details},
};
use crate::{
    db::{
        entities::{artist, project},
        repositories::{
            ArtistProjectRepository, ArtistRepository, ImageRepository, LocationRepository,
            ProjectRepository,
        },
    },
    error::{AppError, Result},
    models::{
        ArtistData, ArtistDetails, ArtistSpec, DeletionSummary, NewArtistWithProject,
        NewLocation, NewProjectWithArtist, ProjectDetails, ProjectSpec,
    },
};

#[derive(Clone)]
pub struct AssociationManager {
    db: DatabaseConnection,
}

impl AssociationManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create an artist together with its image, then either create its
    /// project or link it to every existing project matching by name and
    /// location. Several matching projects all get linked.
    pub async fn create_artist_with_project(
        &self,
        request: NewArtistWithProject,
    ) -> Result<ArtistDetails> {
        let txn = self.db.begin().await?;
        let artist = insert_artist(&txn, &request.artist).await?;
        let links = ArtistProjectRepository::new(&txn);

        match &request.project {
            ProjectSpec::New(data) => {
                let project = insert_project(&txn, data).await?;
                links.link(artist.id, project.id).await?;
                tracing::info!(
                    "Created artist {} with new project {}",
                    artist.id,
                    project.id
                );
            }
            ProjectSpec::Existing { name, location } => {
                let matches = matching_projects(&txn, name, location).await?;
                if matches.is_empty() {
                    tracing::warn!(
                        "No project named '{}' at '{}' found, artist {} stays unlinked",
                        name,
                        location.name(),
                        artist.id
                    );
                }
                for project in &matches {
                    links.link(artist.id, project.id).await?;
                }
                tracing::info!(
                    "Created artist {} linked to {} existing project(s)",
                    artist.id,
                    matches.len()
                );
            }
        }

        let details = artist_details(&txn, artist).await?;
        txn.commit().await?;
        Ok(details)
    }

    /// Mirror of [`Self::create_artist_with_project`]. Existing artists
    /// match on exact name and instagram url.
    pub async fn create_project_with_artist(
        &self,
        request: NewProjectWithArtist,
    ) -> Result<ProjectDetails> {
        let txn = self.db.begin().await?;
        let project = insert_project(&txn, &request.project).await?;
        let links = ArtistProjectRepository::new(&txn);

        match &request.artist {
            ArtistSpec::New(data) => {
                let artist = insert_artist(&txn, data).await?;
                links.link(artist.id, project.id).await?;
                tracing::info!(
                    "Created project {} with new artist {}",
                    project.id,
                    artist.id
                );
            }
            ArtistSpec::Existing {
                name,
                instagram_url,
            } => {
                let matches = matching_artists(&txn, name, instagram_url).await?;
                if matches.is_empty() {
                    tracing::warn!(
                        "No artist named '{}' with instagram '{}' found, project {} stays unlinked",
                        name,
                        instagram_url,
                        project.id
                    );
                }
                for artist in &matches {
                    links.link(artist.id, project.id).await?;
                }
                tracing::info!(
                    "Created project {} linked to {} existing artist(s)",
                    project.id,
                    matches.len()
                );
            }
        }

        let details = project_details(&txn, project).await?;
        txn.commit().await?;
        Ok(details)
    }

    /// Link an artist to each listed project. Ids that do not resolve to a
    /// project are skipped.
    pub async fn add_projects_to_artist(
        &self,
        artist_id: Uuid,
        project_ids: &[Uuid],
    ) -> Result<ArtistDetails> {
        let txn = self.db.begin().await?;
        let artist = ArtistRepository::new(&txn).get(artist_id).await?;
        let projects = ProjectRepository::new(&txn).find_by_ids(project_ids).await?;

        let found: HashSet<Uuid> = projects.iter().map(|p| p.id).collect();
        let skipped: Vec<&Uuid> = project_ids
            .iter()
            .filter(|id| !found.contains(*id))
            .collect();
        if !skipped.is_empty() {
            tracing::warn!(
                "Skipping unknown project ids {:?} while linking artist {}",
                skipped,
                artist_id
            );
        }

        let links = ArtistProjectRepository::new(&txn);
        for project in &projects {
            links.link(artist.id, project.id).await?;
        }
        tracing::info!("Linked artist {} to {} project(s)", artist_id, projects.len());

        let details = artist_details(&txn, artist).await?;
        txn.commit().await?;
        Ok(details)
    }

    /// Link an existing artist to a project. Linking an already linked pair
    /// changes nothing.
    pub async fn add_existing_artist(
        &self,
        project_id: Uuid,
        artist_id: Uuid,
    ) -> Result<ProjectDetails> {
        let txn = self.db.begin().await?;
        let project = ProjectRepository::new(&txn).get(project_id).await?;
        let artist = ArtistRepository::new(&txn).get(artist_id).await?;

        ArtistProjectRepository::new(&txn)
            .link(artist.id, project.id)
            .await?;
        tracing::info!("Linked artist {} to project {}", artist_id, project_id);

        let details = project_details(&txn, project).await?;
        txn.commit().await?;
        Ok(details)
    }

    /// Create an artist and link it to an existing project.
    pub async fn add_new_artist(&self, project_id: Uuid, data: ArtistData) -> Result<ArtistDetails> {
        let txn = self.db.begin().await?;
        let project = ProjectRepository::new(&txn).get(project_id).await?;
        let artist = insert_artist(&txn, &data).await?;

        ArtistProjectRepository::new(&txn)
            .link(artist.id, project.id)
            .await?;
        tracing::info!(
            "Created artist {} for project {}",
            artist.id,
            project_id
        );

        let details = artist_details(&txn, artist).await?;
        txn.commit().await?;
        Ok(details)
    }

    /// Remove an artist from a project. The link is severed and the artist
    /// itself is then deleted with the full artist cascade, so a project
    /// left without artists is deleted as well.
    pub async fn remove_artist_from_project(
        &self,
        project_id: Uuid,
        artist_id: Uuid,
    ) -> Result<DeletionSummary> {
        let txn = self.db.begin().await?;
        ProjectRepository::new(&txn).get(project_id).await?;
        let artist = ArtistRepository::new(&txn).get(artist_id).await?;

        let unlinked = ArtistProjectRepository::new(&txn)
            .unlink(artist_id, project_id)
            .await?;
        if !unlinked {
            return Err(AppError::NotFound(format!(
                "Artist with ID {} is not linked to project with ID {}",
                artist_id, project_id
            )));
        }

        let summary = delete_artist_cascade(&txn, artist).await?;
        txn.commit().await?;
        tracing::info!(
            "Removed artist {} from project {} ({} artist(s), {} project(s) deleted)",
            artist_id,
            project_id,
            summary.artists.len(),
            summary.projects.len()
        );
        Ok(summary)
    }

    /// Delete an artist and its image, then every project left without
    /// artists.
    pub async fn delete_artist(&self, id: Uuid) -> Result<DeletionSummary> {
        let txn = self.db.begin().await?;
        let artist = ArtistRepository::new(&txn).get(id).await?;
        let summary = delete_artist_cascade(&txn, artist).await?;
        txn.commit().await?;
        tracing::info!(
            "Deleted artist {} and {} orphaned project(s)",
            id,
            summary.projects.len()
        );
        Ok(summary)
    }

    /// Delete a project with its image and location, then every artist left
    /// without projects.
    pub async fn delete_project(&self, id: Uuid) -> Result<DeletionSummary> {
        let txn = self.db.begin().await?;
        let project = ProjectRepository::new(&txn).get(id).await?;
        let summary = delete_project_cascade(&txn, project).await?;
        txn.commit().await?;
        tracing::info!(
            "Deleted project {} and {} orphaned artist(s)",
            id,
            summary.artists.len()
        );
        Ok(summary)
    }
}

async fn matching_projects<C: ConnectionTrait>(
    db: &C,
    name: &str,
    location: &NewLocation,
) -> Result<Vec<project::Model>> {
    let locations = LocationRepository::new(db);
    let mut matches = Vec::new();
    for candidate in ProjectRepository::new(db).find_by_name(name).await? {
        let candidate_location = locations.get(candidate.location_id).await?;
        if location.matches(&candidate_location) {
            matches.push(candidate);
        }
    }
    Ok(matches)
}

async fn matching_artists<C: ConnectionTrait>(
    db: &C,
    name: &str,
    instagram_url: &str,
) -> Result<Vec<artist::Model>> {
    Ok(ArtistRepository::new(db)
        .find_by_name(name)
        .await?
        .into_iter()
        .filter(|a| a.name == name && a.instagram_url == instagram_url)
        .collect())
}

async fn delete_artist_cascade<C: ConnectionTrait>(
    db: &C,
    artist: artist::Model,
) -> Result<DeletionSummary> {
    let mut summary = DeletionSummary::default();
    remove_artist_rows(db, &artist).await?;
    summary.artists.push(artist.id);

    for orphan in ProjectRepository::new(db).find_all_with_no_artists().await? {
        tracing::debug!("Deleting orphaned project {}", orphan.id);
        remove_project_rows(db, &orphan).await?;
        summary.projects.push(orphan.id);
    }

    Ok(summary)
}

async fn delete_project_cascade<C: ConnectionTrait>(
    db: &C,
    project: project::Model,
) -> Result<DeletionSummary> {
    let mut summary = DeletionSummary::default();
    remove_project_rows(db, &project).await?;
    summary.projects.push(project.id);

    for orphan in ArtistRepository::new(db).find_all_with_no_projects().await? {
        tracing::debug!("Deleting orphaned artist {}", orphan.id);
        remove_artist_rows(db, &orphan).await?;
        summary.artists.push(orphan.id);
    }

    Ok(summary)
}

/// Links first, then the artist row, then the image it owned.
async fn remove_artist_rows<C: ConnectionTrait>(db: &C, artist: &artist::Model) -> Result<()> {
    let unlinked = ArtistProjectRepository::new(db)
        .delete_by_artist(artist.id)
        .await?;
    ArtistRepository::new(db).delete(artist.id).await?;
    ImageRepository::new(db).delete(artist.image_id).await?;
    tracing::debug!("Removed artist {} and {} link(s)", artist.id, unlinked);
    Ok(())
}

async fn remove_project_rows<C: ConnectionTrait>(db: &C, project: &project::Model) -> Result<()> {
    let unlinked = ArtistProjectRepository::new(db)
        .delete_by_project(project.id)
        .await?;
    ProjectRepository::new(db).delete(project.id).await?;
    ImageRepository::new(db).delete(project.image_id).await?;
    LocationRepository::new(db).delete(project.location_id).await?;
    tracing::debug!("Removed project {} and {} link(s)", project.id, unlinked);
    Ok(())
}
