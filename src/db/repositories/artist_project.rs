use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::db::entities::artist_project;
use crate::error::Result;

pub struct ArtistProjectRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ArtistProjectRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_link(
        &self,
        artist_id: Uuid,
        project_id: Uuid,
    ) -> Result<Option<artist_project::Model>> {
        Ok(artist_project::Entity::find()
            .filter(artist_project::Column::ArtistId.eq(artist_id))
            .filter(artist_project::Column::ProjectId.eq(project_id))
            .one(self.db)
            .await?)
    }

    /// Link the pair, returning the existing record if they are already linked.
    pub async fn link(&self, artist_id: Uuid, project_id: Uuid) -> Result<artist_project::Model> {
        if let Some(existing) = self.find_link(artist_id, project_id).await? {
            return Ok(existing);
        }

        let link = artist_project::ActiveModel {
            id: Set(Uuid::new_v4()),
            artist_id: Set(artist_id),
            project_id: Set(project_id),
        };
        Ok(link.insert(self.db).await?)
    }

    /// Returns false when the pair was not linked.
    pub async fn unlink(&self, artist_id: Uuid, project_id: Uuid) -> Result<bool> {
        let result = artist_project::Entity::delete_many()
            .filter(artist_project::Column::ArtistId.eq(artist_id))
            .filter(artist_project::Column::ProjectId.eq(project_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn delete_by_artist(&self, artist_id: Uuid) -> Result<u64> {
        let result = artist_project::Entity::delete_many()
            .filter(artist_project::Column::ArtistId.eq(artist_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_project(&self, project_id: Uuid) -> Result<u64> {
        let result = artist_project::Entity::delete_many()
            .filter(artist_project::Column::ProjectId.eq(project_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
