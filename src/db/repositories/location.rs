use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

use super::name_contains;
use crate::db::entities::location;
use crate::error::{AppError, Result};

pub struct LocationRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LocationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<location::Model>> {
        Ok(location::Entity::find()
            .order_by_asc(location::Column::Name)
            .all(self.db)
            .await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<location::Model>> {
        Ok(location::Entity::find_by_id(id).one(self.db).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<location::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Location", id))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<location::Model>> {
        Ok(location::Entity::find()
            .order_by_asc(location::Column::Name)
            .all(self.db)
            .await?
            .into_iter()
            .filter(|row| name_contains(&row.name, name))
            .collect())
    }

    pub async fn create(&self, location: location::ActiveModel) -> Result<location::Model> {
        Ok(location.insert(self.db).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        mut location: location::ActiveModel,
    ) -> Result<location::Model> {
        self.get(id).await?;
        location.id = Set(id);
        Ok(location.update(self.db).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = location::Entity::delete_by_id(id).exec(self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Location", id));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(location::Entity::find().count(self.db).await?)
    }
}
