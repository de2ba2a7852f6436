use sea_orm_migration::prelude::*;

use super::m20240601_000003_create_artists_table::Artists;
use super::m20240601_000004_create_projects_table::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArtistProjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ArtistProjects::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ArtistProjects::ArtistId).uuid().not_null())
                    .col(ColumnDef::new(ArtistProjects::ProjectId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artist_projects_artist_id")
                            .from(ArtistProjects::Table, ArtistProjects::ArtistId)
                            .to(Artists::Table, Artists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artist_projects_project_id")
                            .from(ArtistProjects::Table, ArtistProjects::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_artist_projects_project_id")
                    .table(ArtistProjects::Table)
                    .col(ArtistProjects::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_artist_projects_unique")
                    .table(ArtistProjects::Table)
                    .col(ArtistProjects::ArtistId)
                    .col(ArtistProjects::ProjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArtistProjects::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ArtistProjects {
    Table,
    Id,
    ArtistId,
    ProjectId,
}
