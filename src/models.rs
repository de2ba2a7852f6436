//! Validated inputs accepted by the services, and the aggregate views they
//! hand back.
//!
//! Every input type checks its invariants in its constructor, so a value that
//! exists is a value the store will accept. The DTO layer maps JSON into
//! these types before anything reaches the database.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{
    db::entities::{artist, event, image, location, project},
    error::{AppError, Result},
};

/// Column width shared by every text column in the schema.
pub const MAX_TEXT_LEN: usize = 255;

fn required_text(field: &str, value: impl Into<String>) -> Result<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(AppError::invalid(format!("{} must not be blank", field)));
    }
    check_len(field, value)
}

fn optional_text(field: &str, value: Option<String>) -> Result<String> {
    check_len(field, value.unwrap_or_default())
}

fn check_len(field: &str, value: String) -> Result<String> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::invalid(format!(
            "{} must be at most {} characters",
            field, MAX_TEXT_LEN
        )));
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    mimetype: String,
    data: Vec<u8>,
}

impl NewImage {
    pub fn new(mimetype: impl Into<String>, data: Vec<u8>) -> Result<Self> {
        let mimetype = required_text("image mimetype", mimetype)?;
        if data.is_empty() {
            return Err(AppError::invalid("image data must not be empty"));
        }
        Ok(Self { mimetype, data })
    }

    pub fn mimetype(&self) -> &str {
        &self.mimetype
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.mimetype, self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLocation {
    name: String,
    map_address: String,
}

impl NewLocation {
    pub fn new(name: impl Into<String>, map_address: Option<String>) -> Result<Self> {
        Ok(Self {
            name: required_text("location name", name)?,
            map_address: optional_text("location map_address", map_address)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn map_address(&self) -> &str {
        &self.map_address
    }

    /// Case-insensitive comparison on both name and address.
    pub fn matches(&self, other: &location::Model) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
            && self.map_address.to_lowercase() == other.map_address.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistData {
    name: String,
    description: String,
    instagram_url: String,
    image: NewImage,
}

impl ArtistData {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        instagram_url: Option<String>,
        image: NewImage,
    ) -> Result<Self> {
        Ok(Self {
            name: required_text("artist name", name)?,
            description: optional_text("artist description", description)?,
            instagram_url: optional_text("artist instagram_url", instagram_url)?,
            image,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn instagram_url(&self) -> &str {
        &self.instagram_url
    }

    pub fn image(&self) -> &NewImage {
        &self.image
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectData {
    name: String,
    youtube_url: String,
    image: NewImage,
    location: NewLocation,
}

impl ProjectData {
    pub fn new(
        name: impl Into<String>,
        youtube_url: Option<String>,
        image: NewImage,
        location: NewLocation,
    ) -> Result<Self> {
        Ok(Self {
            name: required_text("project name", name)?,
            youtube_url: optional_text("project youtube_url", youtube_url)?,
            image,
            location,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn youtube_url(&self) -> &str {
        &self.youtube_url
    }

    pub fn image(&self) -> &NewImage {
        &self.image
    }

    pub fn location(&self) -> &NewLocation {
        &self.location
    }
}

/// Which projects a newly created artist gets linked to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectSpec {
    /// Create the project alongside the artist.
    New(ProjectData),
    /// Link every stored project whose name contains `name` and whose
    /// location equals `location`, ignoring case.
    Existing { name: String, location: NewLocation },
}

/// Which artists a newly created project gets linked to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistSpec {
    New(ArtistData),
    /// Link every stored artist with exactly this name and instagram url.
    Existing { name: String, instagram_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArtistWithProject {
    pub artist: ArtistData,
    pub project: ProjectSpec,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProjectWithArtist {
    pub project: ProjectData,
    pub artist: ArtistSpec,
}

/// Start/end pair with `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end <= start {
            return Err(AppError::invalid(format!(
                "event end_time {} must be after start_time {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventData {
    name: String,
    description: String,
    image: NewImage,
    location: NewLocation,
    schedule: TimeRange,
}

impl EventData {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        image: NewImage,
        location: NewLocation,
        schedule: TimeRange,
    ) -> Result<Self> {
        Ok(Self {
            name: required_text("event name", name)?,
            description: optional_text("event description", description)?,
            image,
            location,
            schedule,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image(&self) -> &NewImage {
        &self.image
    }

    pub fn location(&self) -> &NewLocation {
        &self.location
    }

    pub fn schedule(&self) -> TimeRange {
        self.schedule
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistSummary {
    pub artist: artist::Model,
    pub image: image::Model,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub project: project::Model,
    pub image: image::Model,
    pub location: location::Model,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistDetails {
    pub artist: artist::Model,
    pub image: image::Model,
    pub projects: Vec<ProjectSummary>,
}

impl ArtistDetails {
    pub fn project_ids(&self) -> Vec<Uuid> {
        self.projects.iter().map(|p| p.project.id).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetails {
    pub project: project::Model,
    pub image: image::Model,
    pub location: location::Model,
    pub artists: Vec<ArtistSummary>,
}

impl ProjectDetails {
    pub fn artist_ids(&self) -> Vec<Uuid> {
        self.artists.iter().map(|a| a.artist.id).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventDetails {
    pub event: event::Model,
    pub image: image::Model,
    pub location: location::Model,
}

/// Ids removed by a cascading delete, the requested entity included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionSummary {
    pub artists: Vec<Uuid>,
    pub projects: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn png() -> NewImage {
        NewImage::new("image/png", vec![1, 2, 3]).unwrap()
    }

    #[test]
    fn test_time_range_rejects_end_before_start() {
        let err = TimeRange::new(at(10), at(9)).unwrap_err();
        assert!(matches!(err, AppError::InvalidFormat(_)));
    }

    #[test]
    fn test_time_range_rejects_empty_range() {
        assert!(matches!(
            TimeRange::new(at(10), at(10)),
            Err(AppError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_time_range_accepts_forward_range() {
        let range = TimeRange::new(at(9), at(10)).unwrap();
        assert_eq!(range.start(), at(9));
        assert_eq!(range.end(), at(10));
    }

    #[test]
    fn test_image_requires_mimetype_and_data() {
        assert!(NewImage::new("  ", vec![1]).is_err());
        assert!(NewImage::new("image/png", vec![]).is_err());
    }

    #[test]
    fn test_text_length_limit() {
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        assert!(ArtistData::new(long.clone(), None, None, png()).is_err());
        assert!(ArtistData::new("ok", Some(long), None, png()).is_err());
        assert!(ArtistData::new("x".repeat(MAX_TEXT_LEN), None, None, png()).is_ok());
    }

    #[test]
    fn test_optional_text_defaults_to_empty() {
        let artist = ArtistData::new("Banksy", None, None, png()).unwrap();
        assert_eq!(artist.description(), "");
        assert_eq!(artist.instagram_url(), "");
    }

    #[test]
    fn test_location_matches_ignores_case() {
        let wanted = NewLocation::new("Old Harbour", Some("Quay 3".to_string())).unwrap();
        let stored = location::Model {
            id: Uuid::new_v4(),
            name: "old harbour".to_string(),
            map_address: "QUAY 3".to_string(),
        };
        assert!(wanted.matches(&stored));

        let elsewhere = location::Model {
            map_address: "Quay 4".to_string(),
            ..stored
        };
        assert!(!wanted.matches(&elsewhere));
    }
}
