pub mod artists;
pub mod associations;
pub mod events;
pub mod images;
pub mod locations;
pub mod projects;
mod views;

pub use artists::ArtistService;
pub use associations::AssociationManager;
pub use events::EventService;
pub use images::ImageService;
pub use locations::LocationService;
pub use projects::ProjectService;
