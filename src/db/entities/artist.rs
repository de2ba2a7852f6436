use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "artists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub instagram_url: String,
    #[sea_orm(unique)]
    pub image_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::image::Entity",
        from = "Column::ImageId",
        to = "super::image::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Image,
    #[sea_orm(has_many = "super::artist_project::Entity")]
    ArtistProjects,
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl Related<super::artist_project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArtistProjects.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        super::artist_project::Relation::Project.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::artist_project::Relation::Artist.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
