use sea_orm::{ConnectionTrait, DatabaseConnection, Set, TransactionTrait};
use uuid::Uuid;

use super::{
    images::{insert_image, replace_image},
    views::artist_details,
    AssociationManager,
};
use crate::{
    db::{entities::artist, repositories::ArtistRepository},
    error::Result,
    models::{ArtistData, ArtistDetails, DeletionSummary, NewArtistWithProject},
};

/// Insert an artist and the image it owns. No links are written.
pub(crate) async fn insert_artist<C: ConnectionTrait>(db: &C, data: &ArtistData) -> Result<artist::Model> {
    let image = insert_image(db, data.image()).await?;
    ArtistRepository::new(db)
        .create(artist::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name().to_string()),
            description: Set(data.description().to_string()),
            instagram_url: Set(data.instagram_url().to_string()),
            image_id: Set(image.id),
        })
        .await
}

#[derive(Clone)]
pub struct ArtistService {
    db: DatabaseConnection,
    associations: AssociationManager,
}

impl ArtistService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            associations: AssociationManager::new(db.clone()),
            db,
        }
    }

    pub async fn find_all(&self) -> Result<Vec<ArtistDetails>> {
        let mut artists = Vec::new();
        for artist in ArtistRepository::new(&self.db).find_all().await? {
            artists.push(artist_details(&self.db, artist).await?);
        }
        Ok(artists)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ArtistDetails>> {
        match ArtistRepository::new(&self.db).find_by_id(id).await? {
            Some(artist) => Ok(Some(artist_details(&self.db, artist).await?)),
            None => Ok(None),
        }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<ArtistDetails>> {
        let mut artists = Vec::new();
        for artist in ArtistRepository::new(&self.db).find_by_name(name).await? {
            artists.push(artist_details(&self.db, artist).await?);
        }
        Ok(artists)
    }

    pub async fn count(&self) -> Result<u64> {
        ArtistRepository::new(&self.db).count().await
    }

    /// Create a standalone artist without any project.
    pub async fn create(&self, data: ArtistData) -> Result<ArtistDetails> {
        let txn = self.db.begin().await?;
        let artist = insert_artist(&txn, &data).await?;
        let details = artist_details(&txn, artist).await?;
        txn.commit().await?;
        tracing::info!("Created artist {}", details.artist.id);
        Ok(details)
    }

    pub async fn create_with_project(&self, request: NewArtistWithProject) -> Result<ArtistDetails> {
        self.associations.create_artist_with_project(request).await
    }

    /// Replace the profile and the image content of an existing artist.
    /// Project links are left untouched.
    pub async fn update(&self, id: Uuid, data: ArtistData) -> Result<ArtistDetails> {
        let txn = self.db.begin().await?;
        let repo = ArtistRepository::new(&txn);
        let existing = repo.get(id).await?;

        replace_image(&txn, existing.image_id, data.image()).await?;
        let updated = repo
            .update(
                id,
                artist::ActiveModel {
                    name: Set(data.name().to_string()),
                    description: Set(data.description().to_string()),
                    instagram_url: Set(data.instagram_url().to_string()),
                    ..Default::default()
                },
            )
            .await?;

        let details = artist_details(&txn, updated).await?;
        txn.commit().await?;
        tracing::info!("Updated artist {}", id);
        Ok(details)
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeletionSummary> {
        self.associations.delete_artist(id).await
    }

    pub async fn add_projects(&self, artist_id: Uuid, project_ids: &[Uuid]) -> Result<ArtistDetails> {
        self.associations
            .add_projects_to_artist(artist_id, project_ids)
            .await
    }
}
