use sea_orm::{
    sea_query::Query, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::name_contains;
use crate::db::entities::{artist, artist_project, project};
use crate::error::{AppError, Result};

pub struct ProjectRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProjectRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<project::Model>> {
        Ok(project::Entity::find()
            .order_by_asc(project::Column::CreatedOn)
            .all(self.db)
            .await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<project::Model>> {
        Ok(project::Entity::find_by_id(id).one(self.db).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<project::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Project", id))
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<project::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(project::Entity::find()
            .filter(project::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await?)
    }

    /// Case-insensitive substring search on the project name.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<project::Model>> {
        Ok(project::Entity::find()
            .order_by_asc(project::Column::CreatedOn)
            .all(self.db)
            .await?
            .into_iter()
            .filter(|row| name_contains(&row.name, name))
            .collect())
    }

    /// Projects that are not linked to any artist.
    pub async fn find_all_with_no_artists(&self) -> Result<Vec<project::Model>> {
        Ok(project::Entity::find()
            .filter(
                project::Column::Id.not_in_subquery(
                    Query::select()
                        .column(artist_project::Column::ProjectId)
                        .from(artist_project::Entity)
                        .to_owned(),
                ),
            )
            .all(self.db)
            .await?)
    }

    pub async fn find_artists(&self, project_id: Uuid) -> Result<Vec<artist::Model>> {
        Ok(artist::Entity::find()
            .inner_join(artist_project::Entity)
            .filter(artist_project::Column::ProjectId.eq(project_id))
            .order_by_asc(artist::Column::Name)
            .distinct()
            .all(self.db)
            .await?)
    }

    pub async fn create(&self, project: project::ActiveModel) -> Result<project::Model> {
        Ok(project.insert(self.db).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        mut project: project::ActiveModel,
    ) -> Result<project::Model> {
        self.get(id).await?;
        project.id = Set(id);
        Ok(project.update(self.db).await?)
    }

    /// Removes the row only. Links, image and location are the caller's job.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = project::Entity::delete_by_id(id).exec(self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Project", id));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(project::Entity::find().count(self.db).await?)
    }
}
