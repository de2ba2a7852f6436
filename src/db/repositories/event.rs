use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

use super::name_contains;
use crate::db::entities::event;
use crate::error::{AppError, Result};

pub struct EventRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EventRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<event::Model>> {
        Ok(event::Entity::find()
            .order_by_asc(event::Column::StartTime)
            .all(self.db)
            .await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<event::Model>> {
        Ok(event::Entity::find_by_id(id).one(self.db).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<event::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Event", id))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<event::Model>> {
        Ok(event::Entity::find()
            .order_by_asc(event::Column::StartTime)
            .all(self.db)
            .await?
            .into_iter()
            .filter(|row| name_contains(&row.name, name))
            .collect())
    }

    pub async fn create(&self, event: event::ActiveModel) -> Result<event::Model> {
        Ok(event.insert(self.db).await?)
    }

    pub async fn update(&self, id: Uuid, mut event: event::ActiveModel) -> Result<event::Model> {
        self.get(id).await?;
        event.id = Set(id);
        Ok(event.update(self.db).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = event::Entity::delete_by_id(id).exec(self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Event", id));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(event::Entity::find().count(self.db).await?)
    }
}
