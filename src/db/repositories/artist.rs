use sea_orm::{
    sea_query::Query, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::name_contains;
use crate::db::entities::{artist, artist_project, project};
use crate::error::{AppError, Result};

pub struct ArtistRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ArtistRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<artist::Model>> {
        Ok(artist::Entity::find()
            .order_by_asc(artist::Column::Name)
            .all(self.db)
            .await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<artist::Model>> {
        Ok(artist::Entity::find_by_id(id).one(self.db).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<artist::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Artist", id))
    }

    /// Case-insensitive substring search on the artist name.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<artist::Model>> {
        Ok(artist::Entity::find()
            .order_by_asc(artist::Column::Name)
            .all(self.db)
            .await?
            .into_iter()
            .filter(|row| name_contains(&row.name, name))
            .collect())
    }

    /// Artists that are not linked to any project.
    pub async fn find_all_with_no_projects(&self) -> Result<Vec<artist::Model>> {
        Ok(artist::Entity::find()
            .filter(
                artist::Column::Id.not_in_subquery(
                    Query::select()
                        .column(artist_project::Column::ArtistId)
                        .from(artist_project::Entity)
                        .to_owned(),
                ),
            )
            .all(self.db)
            .await?)
    }

    /// Projects linked to the artist, oldest first.
    pub async fn find_projects(&self, artist_id: Uuid) -> Result<Vec<project::Model>> {
        Ok(project::Entity::find()
            .inner_join(artist_project::Entity)
            .filter(artist_project::Column::ArtistId.eq(artist_id))
            .order_by_asc(project::Column::CreatedOn)
            .distinct()
            .all(self.db)
            .await?)
    }

    pub async fn create(&self, artist: artist::ActiveModel) -> Result<artist::Model> {
        Ok(artist.insert(self.db).await?)
    }

    /// Overwrite an existing artist row. Fails with `NotFound` instead of
    /// inserting when the id is unknown.
    pub async fn update(&self, id: Uuid, mut artist: artist::ActiveModel) -> Result<artist::Model> {
        self.get(id).await?;
        artist.id = Set(id);
        Ok(artist.update(self.db).await?)
    }

    /// Removes the row only. Links and the owned image are the caller's job.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = artist::Entity::delete_by_id(id).exec(self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Artist", id));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(artist::Entity::find().count(self.db).await?)
    }
}
