pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_images_table;
mod m20240601_000002_create_locations_table;
mod m20240601_000003_create_artists_table;
mod m20240601_000004_create_projects_table;
mod m20240601_000005_create_artist_projects_table;
mod m20240601_000006_create_events_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_images_table::Migration),
            Box::new(m20240601_000002_create_locations_table::Migration),
            Box::new(m20240601_000003_create_artists_table::Migration),
            Box::new(m20240601_000004_create_projects_table::Migration),
            Box::new(m20240601_000005_create_artist_projects_table::Migration),
            Box::new(m20240601_000006_create_events_table::Migration),
        ]
    }
}
