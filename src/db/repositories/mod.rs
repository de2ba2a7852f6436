//! Stores for every table.
//!
//! Each repository borrows anything implementing [`ConnectionTrait`], so the
//! same code runs against the pooled connection for reads and against a
//! [`sea_orm::DatabaseTransaction`] inside multi-step operations. Repositories
//! never touch rows other than their own table; relationship bookkeeping
//! lives in the association manager.

mod artist;
mod artist_project;
mod event;
mod image;
mod location;
mod project;

pub use artist::ArtistRepository;
pub use artist_project::ArtistProjectRepository;
pub use event::EventRepository;
pub use image::ImageRepository;
pub use location::LocationRepository;
pub use project::ProjectRepository;

/// Case-insensitive substring match with Unicode case folding. Applied to
/// fetched rows, since SQLite's `LOWER` folds ASCII only.
pub(crate) fn name_contains(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}
