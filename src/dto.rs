//! JSON shapes exchanged with the frontend.
//!
//! Import DTOs keep every field optional so that a missing field surfaces as
//! an `InvalidFormat` error from the mapping below instead of a generic body
//! rejection. Each DTO has exactly one mapping into the validated domain type
//! and, for exports, one mapping back out. Image bytes travel as standard
//! Base64.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::NaiveDateTime;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::{
    db::entities::{image, location},
    error::{AppError, Result},
    models::{
        ArtistData, ArtistDetails, ArtistSpec, ArtistSummary, EventData, EventDetails, NewArtistWithProject,
        NewImage, NewLocation, NewProjectWithArtist, ProjectData, ProjectDetails, ProjectSpec,
        ProjectSummary, TimeRange,
    },
};

fn required<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| AppError::invalid(format!("{} is required", field)))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub mimetype: Option<String>,
    pub data: Option<String>,
}

impl TryFrom<ImageDto> for NewImage {
    type Error = AppError;

    fn try_from(dto: ImageDto) -> Result<Self> {
        let mimetype = required("image.mimetype", dto.mimetype)?;
        let encoded = required("image.data", dto.data)?;
        let data = STANDARD
            .decode(encoded.trim())
            .map_err(|e| AppError::invalid(format!("image.data is not valid Base64: {}", e)))?;
        NewImage::new(mimetype, data)
    }
}

impl From<image::Model> for ImageDto {
    fn from(image: image::Model) -> Self {
        Self {
            id: Some(image.id.to_string()),
            mimetype: Some(image.mimetype),
            data: Some(STANDARD.encode(image.data)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub map_address: Option<String>,
}

impl TryFrom<LocationDto> for NewLocation {
    type Error = AppError;

    fn try_from(dto: LocationDto) -> Result<Self> {
        NewLocation::new(required("location.name", dto.name)?, dto.map_address)
    }
}

impl From<location::Model> for LocationDto {
    fn from(location: location::Model) -> Self {
        Self {
            id: Some(location.id.to_string()),
            name: Some(location.name),
            map_address: Some(location.map_address),
        }
    }
}

/// Artist profile without links, as nested in project requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistDataDto {
    pub name: Option<String>,
    pub image: Option<ImageDto>,
    pub description: Option<String>,
    pub instagram_url: Option<String>,
}

impl TryFrom<ArtistDataDto> for ArtistData {
    type Error = AppError;

    fn try_from(dto: ArtistDataDto) -> Result<Self> {
        let image = required("artist.image", dto.image)?.try_into()?;
        ArtistData::new(
            required("artist.name", dto.name)?,
            dto.description,
            dto.instagram_url,
            image,
        )
    }
}

/// Project profile without links, as nested in artist requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDataDto {
    pub name: Option<String>,
    pub location: Option<LocationDto>,
    pub image: Option<ImageDto>,
    pub youtube_url: Option<String>,
}

impl TryFrom<ProjectDataDto> for ProjectData {
    type Error = AppError;

    fn try_from(dto: ProjectDataDto) -> Result<Self> {
        let image = required("project.image", dto.image)?.try_into()?;
        let location = required("project.location", dto.location)?.try_into()?;
        ProjectData::new(
            required("project.name", dto.name)?,
            dto.youtube_url,
            image,
            location,
        )
    }
}

/// Body of `POST /api/artists` and `PUT /api/artists/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistImportDto {
    pub name: Option<String>,
    pub image: Option<ImageDto>,
    pub description: Option<String>,
    pub instagram_url: Option<String>,
    pub project: Option<ProjectDataDto>,
    #[serde(default)]
    pub is_project_existing: Option<bool>,
}

impl ArtistImportDto {
    fn profile(&self) -> ArtistDataDto {
        ArtistDataDto {
            name: self.name.clone(),
            image: self.image.clone(),
            description: self.description.clone(),
            instagram_url: self.instagram_url.clone(),
        }
    }
}

impl TryFrom<ArtistImportDto> for NewArtistWithProject {
    type Error = AppError;

    fn try_from(dto: ArtistImportDto) -> Result<Self> {
        let artist = ArtistData::try_from(dto.profile())?;
        let project = required("project", dto.project)?;

        let project = if dto.is_project_existing.unwrap_or(false) {
            ProjectSpec::Existing {
                name: required("project.name", project.name)?,
                location: required("project.location", project.location)?.try_into()?,
            }
        } else {
            ProjectSpec::New(project.try_into()?)
        };

        Ok(Self { artist, project })
    }
}

/// Updates only look at the profile part of the import body.
impl TryFrom<ArtistImportDto> for ArtistData {
    type Error = AppError;

    fn try_from(dto: ArtistImportDto) -> Result<Self> {
        dto.profile().try_into()
    }
}

/// Body of `POST /api/projects` and `PUT /api/projects/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectImportDto {
    pub name: Option<String>,
    pub location: Option<LocationDto>,
    pub image: Option<ImageDto>,
    pub youtube_url: Option<String>,
    pub artist: Option<ArtistDataDto>,
    #[serde(default)]
    pub is_artist_existing: Option<bool>,
}

impl ProjectImportDto {
    fn profile(&self) -> ProjectDataDto {
        ProjectDataDto {
            name: self.name.clone(),
            location: self.location.clone(),
            image: self.image.clone(),
            youtube_url: self.youtube_url.clone(),
        }
    }
}

impl TryFrom<ProjectImportDto> for NewProjectWithArtist {
    type Error = AppError;

    fn try_from(dto: ProjectImportDto) -> Result<Self> {
        let project = ProjectData::try_from(dto.profile())?;
        let artist = required("artist", dto.artist)?;

        let artist = if dto.is_artist_existing.unwrap_or(false) {
            ArtistSpec::Existing {
                name: required("artist.name", artist.name)?,
                instagram_url: artist.instagram_url.unwrap_or_default(),
            }
        } else {
            ArtistSpec::New(artist.try_into()?)
        };

        Ok(Self { project, artist })
    }
}

impl TryFrom<ProjectImportDto> for ProjectData {
    type Error = AppError;

    fn try_from(dto: ProjectImportDto) -> Result<Self> {
        dto.profile().try_into()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<ImageDto>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub location: Option<LocationDto>,
}

impl TryFrom<EventDto> for EventData {
    type Error = AppError;

    fn try_from(dto: EventDto) -> Result<Self> {
        let schedule = TimeRange::new(
            required("event.start_time", dto.start_time)?,
            required("event.end_time", dto.end_time)?,
        )?;
        EventData::new(
            required("event.name", dto.name)?,
            dto.description,
            required("event.image", dto.image)?.try_into()?,
            required("event.location", dto.location)?.try_into()?,
            schedule,
        )
    }
}

impl From<EventDetails> for EventDto {
    fn from(details: EventDetails) -> Self {
        let EventDetails {
            event,
            image,
            location,
        } = details;
        Self {
            id: Some(event.id.to_string()),
            name: Some(event.name),
            description: Some(event.description),
            image: Some(image.into()),
            start_time: Some(event.start_time),
            end_time: Some(event.end_time),
            location: Some(location.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistSummaryDto {
    pub id: String,
    pub name: String,
    pub image: ImageDto,
    pub description: String,
    pub instagram_url: String,
}

impl From<ArtistSummary> for ArtistSummaryDto {
    fn from(summary: ArtistSummary) -> Self {
        let ArtistSummary { artist, image } = summary;
        Self {
            id: artist.id.to_string(),
            name: artist.name,
            image: image.into(),
            description: artist.description,
            instagram_url: artist.instagram_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummaryDto {
    pub id: String,
    pub name: String,
    pub location: LocationDto,
    pub image: ImageDto,
    pub youtube_url: String,
    pub created_on: DateTimeWithTimeZone,
}

impl From<ProjectSummary> for ProjectSummaryDto {
    fn from(summary: ProjectSummary) -> Self {
        let ProjectSummary {
            project,
            image,
            location,
        } = summary;
        Self {
            id: project.id.to_string(),
            name: project.name,
            location: location.into(),
            image: image.into(),
            youtube_url: project.youtube_url,
            created_on: project.created_on,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistExportDto {
    pub id: String,
    pub name: String,
    pub image: ImageDto,
    pub description: String,
    pub instagram_url: String,
    pub projects: Vec<ProjectSummaryDto>,
}

impl From<ArtistDetails> for ArtistExportDto {
    fn from(details: ArtistDetails) -> Self {
        let ArtistDetails {
            artist,
            image,
            projects,
        } = details;
        Self {
            id: artist.id.to_string(),
            name: artist.name,
            image: image.into(),
            description: artist.description,
            instagram_url: artist.instagram_url,
            projects: projects.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectExportDto {
    pub id: String,
    pub name: String,
    pub location: LocationDto,
    pub image: ImageDto,
    pub youtube_url: String,
    pub created_on: DateTimeWithTimeZone,
    pub artists: Vec<ArtistSummaryDto>,
}

impl From<ProjectDetails> for ProjectExportDto {
    fn from(details: ProjectDetails) -> Self {
        let ProjectDetails {
            project,
            image,
            location,
            artists,
        } = details;
        Self {
            id: project.id.to_string(),
            name: project.name,
            location: location.into(),
            image: image.into(),
            youtube_url: project.youtube_url,
            created_on: project.created_on,
            artists: artists.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn image_dto() -> ImageDto {
        ImageDto {
            id: None,
            mimetype: Some("image/png".to_string()),
            data: Some(STANDARD.encode([137u8, 80, 78, 71])),
        }
    }

    fn location_dto(name: &str) -> LocationDto {
        LocationDto {
            id: None,
            name: Some(name.to_string()),
            map_address: Some("Main Square 1".to_string()),
        }
    }

    fn project_dto() -> ProjectDataDto {
        ProjectDataDto {
            name: Some("Mural".to_string()),
            location: Some(location_dto("Town Hall")),
            image: Some(image_dto()),
            youtube_url: None,
        }
    }

    fn artist_import(is_project_existing: Option<bool>) -> ArtistImportDto {
        ArtistImportDto {
            name: Some("Ana".to_string()),
            image: Some(image_dto()),
            description: Some("Painter".to_string()),
            instagram_url: Some("https://instagram.com/ana".to_string()),
            project: Some(project_dto()),
            is_project_existing,
        }
    }

    #[test]
    fn test_image_dto_decodes_base64() {
        let image = NewImage::try_from(image_dto()).unwrap();
        assert_eq!(image.mimetype(), "image/png");
        assert_eq!(image.data(), &[137u8, 80, 78, 71]);
    }

    #[test]
    fn test_image_dto_rejects_bad_base64() {
        let dto = ImageDto {
            data: Some("not base64!!".to_string()),
            ..image_dto()
        };
        assert!(matches!(
            NewImage::try_from(dto),
            Err(AppError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_image_dto_requires_fields() {
        let dto = ImageDto {
            mimetype: None,
            ..image_dto()
        };
        assert!(matches!(
            NewImage::try_from(dto),
            Err(AppError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_image_export_round_trips_bytes() {
        let model = image::Model {
            id: Uuid::new_v4(),
            mimetype: "image/jpeg".to_string(),
            data: vec![0xff, 0xd8, 0xff],
        };
        let dto = ImageDto::from(model.clone());
        assert_eq!(dto.id, Some(model.id.to_string()));
        assert_eq!(dto.data, Some("/9j/".to_string()));
    }

    #[test]
    fn test_artist_import_new_project() {
        let request = NewArtistWithProject::try_from(artist_import(Some(false))).unwrap();
        assert_eq!(request.artist.name(), "Ana");
        match request.project {
            ProjectSpec::New(project) => {
                assert_eq!(project.name(), "Mural");
                assert_eq!(project.location().name(), "Town Hall");
                assert_eq!(project.youtube_url(), "");
            }
            other => panic!("expected new project, got {:?}", other),
        }
    }

    #[test]
    fn test_artist_import_defaults_to_new_project() {
        let request = NewArtistWithProject::try_from(artist_import(None)).unwrap();
        assert!(matches!(request.project, ProjectSpec::New(_)));
    }

    #[test]
    fn test_artist_import_existing_project_needs_no_image() {
        let mut dto = artist_import(Some(true));
        dto.project = Some(ProjectDataDto {
            image: None,
            ..project_dto()
        });

        let request = NewArtistWithProject::try_from(dto).unwrap();
        match request.project {
            ProjectSpec::Existing { name, location } => {
                assert_eq!(name, "Mural");
                assert_eq!(location.map_address(), "Main Square 1");
            }
            other => panic!("expected existing project, got {:?}", other),
        }
    }

    #[test]
    fn test_artist_import_with_broken_project_image_fails() {
        let mut dto = artist_import(Some(false));
        dto.project = Some(ProjectDataDto {
            image: Some(ImageDto {
                data: Some("%%%".to_string()),
                ..image_dto()
            }),
            ..project_dto()
        });
        assert!(matches!(
            NewArtistWithProject::try_from(dto),
            Err(AppError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_artist_import_requires_name() {
        let mut dto = artist_import(Some(false));
        dto.name = Some("   ".to_string());
        assert!(NewArtistWithProject::try_from(dto).is_err());
    }

    #[test]
    fn test_project_import_existing_artist() {
        let dto = ProjectImportDto {
            name: Some("Mural".to_string()),
            location: Some(location_dto("Town Hall")),
            image: Some(image_dto()),
            youtube_url: Some("https://youtu.be/x".to_string()),
            artist: Some(ArtistDataDto {
                name: Some("Ana".to_string()),
                image: None,
                description: None,
                instagram_url: Some("https://instagram.com/ana".to_string()),
            }),
            is_artist_existing: Some(true),
        };

        let request = NewProjectWithArtist::try_from(dto).unwrap();
        assert_eq!(
            request.artist,
            ArtistSpec::Existing {
                name: "Ana".to_string(),
                instagram_url: "https://instagram.com/ana".to_string(),
            }
        );
    }

    #[test]
    fn test_event_dto_rejects_inverted_range() {
        let start = NaiveDateTime::parse_from_str("2025-01-01 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let end = NaiveDateTime::parse_from_str("2025-01-01 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let dto = EventDto {
            id: None,
            name: Some("Opening".to_string()),
            description: None,
            image: Some(image_dto()),
            start_time: Some(start),
            end_time: Some(end),
            location: Some(location_dto("Gallery")),
        };
        assert!(matches!(
            EventData::try_from(dto),
            Err(AppError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_event_dto_parses_iso_times() {
        let json = serde_json::json!({
            "name": "Opening",
            "image": { "mimetype": "image/png", "data": "AQID" },
            "start_time": "2025-01-01T09:00:00",
            "end_time": "2025-01-01T10:00:00",
            "location": { "name": "Gallery", "map_address": "" }
        });
        let dto: EventDto = serde_json::from_value(json).unwrap();
        let event = EventData::try_from(dto).unwrap();
        assert_eq!(event.schedule().start().to_string(), "2025-01-01 09:00:00");
        assert_eq!(event.image().data(), &[1u8, 2, 3]);
    }
}
