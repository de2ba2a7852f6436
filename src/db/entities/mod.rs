pub mod artist;
pub mod artist_project;
pub mod event;
pub mod image;
pub mod location;
pub mod project;

pub use artist::Entity as Artist;
pub use artist_project::Entity as ArtistProject;
pub use event::Entity as Event;
pub use image::Entity as Image;
pub use location::Entity as Location;
pub use project::Entity as Project;
