use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, Set, TransactionTrait};
use uuid::Uuid;

use super::{
    images::{insert_image, replace_image},
    locations::{insert_location, replace_location},
    views::project_details,
    AssociationManager,
};
use crate::{
    db::{entities::project, repositories::ProjectRepository},
    error::Result,
    models::{
        ArtistData, ArtistDetails, DeletionSummary, NewProjectWithArtist, ProjectData,
        ProjectDetails,
    },
};

/// Insert a project with its image and location. `created_on` is stamped
/// here and never written again.
pub(crate) async fn insert_project<C: ConnectionTrait>(
    db: &C,
    data: &ProjectData,
) -> Result<project::Model> {
    let image = insert_image(db, data.image()).await?;
    let location = insert_location(db, data.location()).await?;
    ProjectRepository::new(db)
        .create(project::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name().to_string()),
            youtube_url: Set(data.youtube_url().to_string()),
            created_on: Set(Utc::now().into()),
            image_id: Set(image.id),
            location_id: Set(location.id),
        })
        .await
}

#[derive(Clone)]
pub struct ProjectService {
    db: DatabaseConnection,
    associations: AssociationManager,
}

impl ProjectService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            associations: AssociationManager::new(db.clone()),
            db,
        }
    }

    pub async fn find_all(&self) -> Result<Vec<ProjectDetails>> {
        let mut projects = Vec::new();
        for project in ProjectRepository::new(&self.db).find_all().await? {
            projects.push(project_details(&self.db, project).await?);
        }
        Ok(projects)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ProjectDetails>> {
        match ProjectRepository::new(&self.db).find_by_id(id).await? {
            Some(project) => Ok(Some(project_details(&self.db, project).await?)),
            None => Ok(None),
        }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<ProjectDetails>> {
        let mut projects = Vec::new();
        for project in ProjectRepository::new(&self.db).find_by_name(name).await? {
            projects.push(project_details(&self.db, project).await?);
        }
        Ok(projects)
    }

    pub async fn count(&self) -> Result<u64> {
        ProjectRepository::new(&self.db).count().await
    }

    /// Create a standalone project without any artist.
    pub async fn create(&self, data: ProjectData) -> Result<ProjectDetails> {
        let txn = self.db.begin().await?;
        let project = insert_project(&txn, &data).await?;
        let details = project_details(&txn, project).await?;
        txn.commit().await?;
        tracing::info!("Created project {}", details.project.id);
        Ok(details)
    }

    pub async fn create_with_artist(&self, request: NewProjectWithArtist) -> Result<ProjectDetails> {
        self.associations.create_project_with_artist(request).await
    }

    /// Replace profile, image and location content. `created_on` and the
    /// artist links stay as they are.
    pub async fn update(&self, id: Uuid, data: ProjectData) -> Result<ProjectDetails> {
        let txn = self.db.begin().await?;
        let repo = ProjectRepository::new(&txn);
        let existing = repo.get(id).await?;

        replace_image(&txn, existing.image_id, data.image()).await?;
        replace_location(&txn, existing.location_id, data.location()).await?;
        let updated = repo
            .update(
                id,
                project::ActiveModel {
                    name: Set(data.name().to_string()),
                    youtube_url: Set(data.youtube_url().to_string()),
                    ..Default::default()
                },
            )
            .await?;

        let details = project_details(&txn, updated).await?;
        txn.commit().await?;
        tracing::info!("Updated project {}", id);
        Ok(details)
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeletionSummary> {
        self.associations.delete_project(id).await
    }

    pub async fn add_existing_artist(&self, project_id: Uuid, artist_id: Uuid) -> Result<ProjectDetails> {
        self.associations
            .add_existing_artist(project_id, artist_id)
            .await
    }

    pub async fn add_new_artist(&self, project_id: Uuid, data: ArtistData) -> Result<ArtistDetails> {
        self.associations.add_new_artist(project_id, data).await
    }

    pub async fn remove_artist(&self, project_id: Uuid, artist_id: Uuid) -> Result<DeletionSummary> {
        self.associations
            .remove_artist_from_project(project_id, artist_id)
            .await
    }
}
