use sea_orm::{ConnectionTrait, DatabaseConnection, Set};
use uuid::Uuid;

use crate::{
    db::{entities::image, repositories::ImageRepository},
    error::Result,
    models::NewImage,
};

/// Insert a fresh image row for a new owner.
pub(crate) async fn insert_image<C: ConnectionTrait>(db: &C, image: &NewImage) -> Result<image::Model> {
    ImageRepository::new(db)
        .create(image::ActiveModel {
            id: Set(Uuid::new_v4()),
            mimetype: Set(image.mimetype().to_string()),
            data: Set(image.data().to_vec()),
        })
        .await
}

/// Replace the content of an existing image, keeping its id.
pub(crate) async fn replace_image<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    image: &NewImage,
) -> Result<image::Model> {
    ImageRepository::new(db)
        .update(
            id,
            image::ActiveModel {
                mimetype: Set(image.mimetype().to_string()),
                data: Set(image.data().to_vec()),
                ..Default::default()
            },
        )
        .await
}

/// Blob store. Passive: owners drive creation and deletion of the images
/// they hold, so deleting an owned image here fails on the foreign key.
#[derive(Clone)]
pub struct ImageService {
    db: DatabaseConnection,
}

impl ImageService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<image::Model>> {
        ImageRepository::new(&self.db).find_all().await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<image::Model>> {
        ImageRepository::new(&self.db).find_by_id(id).await
    }

    pub async fn create(&self, image: NewImage) -> Result<image::Model> {
        let created = insert_image(&self.db, &image).await?;
        tracing::debug!("Created image {} ({})", created.id, created.mimetype);
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, image: NewImage) -> Result<image::Model> {
        replace_image(&self.db, id, &image).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        ImageRepository::new(&self.db).delete(id).await?;
        tracing::debug!("Deleted image {}", id);
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        ImageRepository::new(&self.db).count().await
    }
}
