use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, Set};
use uuid::Uuid;

use crate::db::entities::image;
use crate::error::{AppError, Result};

pub struct ImageRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ImageRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<image::Model>> {
        Ok(image::Entity::find().all(self.db).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<image::Model>> {
        Ok(image::Entity::find_by_id(id).one(self.db).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<image::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Image", id))
    }

    pub async fn create(&self, image: image::ActiveModel) -> Result<image::Model> {
        Ok(image.insert(self.db).await?)
    }

    /// Overwrite an existing image. Not an upsert.
    pub async fn update(&self, id: Uuid, mut image: image::ActiveModel) -> Result<image::Model> {
        self.get(id).await?;
        image.id = Set(id);
        Ok(image.update(self.db).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = image::Entity::delete_by_id(id).exec(self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Image", id));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(image::Entity::find().count(self.db).await?)
    }
}
