use sea_orm::{ConnectionTrait, DatabaseConnection, Set};
use uuid::Uuid;

use crate::{
    db::{entities::location, repositories::LocationRepository},
    error::Result,
    models::NewLocation,
};

pub(crate) async fn insert_location<C: ConnectionTrait>(
    db: &C,
    location: &NewLocation,
) -> Result<location::Model> {
    LocationRepository::new(db)
        .create(location::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(location.name().to_string()),
            map_address: Set(location.map_address().to_string()),
        })
        .await
}

pub(crate) async fn replace_location<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    location: &NewLocation,
) -> Result<location::Model> {
    LocationRepository::new(db)
        .update(
            id,
            location::ActiveModel {
                name: Set(location.name().to_string()),
                map_address: Set(location.map_address().to_string()),
                ..Default::default()
            },
        )
        .await
}

/// Place store. Same ownership rules as [`super::ImageService`].
#[derive(Clone)]
pub struct LocationService {
    db: DatabaseConnection,
}

impl LocationService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<location::Model>> {
        LocationRepository::new(&self.db).find_all().await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<location::Model>> {
        LocationRepository::new(&self.db).find_by_id(id).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<location::Model>> {
        LocationRepository::new(&self.db).find_by_name(name).await
    }

    pub async fn create(&self, location: NewLocation) -> Result<location::Model> {
        insert_location(&self.db, &location).await
    }

    pub async fn update(&self, id: Uuid, location: NewLocation) -> Result<location::Model> {
        replace_location(&self.db, id, &location).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        LocationRepository::new(&self.db).delete(id).await
    }

    pub async fn count(&self) -> Result<u64> {
        LocationRepository::new(&self.db).count().await
    }
}
