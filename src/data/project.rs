//! Project records and the drafts the admin form produces.
//!
//! The backend has served two shapes over time: a list of `images` and, on
//! older rows, a single `image`. [`ProjectRecord`] accepts both and
//! [`Project`] always carries one ordered [`ImageSequence`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Ordered, read-only image references shared by a carousel and its lightbox
pub type ImageSequence = Arc<[String]>;

/// Project category as used by the gallery filter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Medical,
    Residential,
    Commercial,
    /// Anything the backend sends that we don't know about
    Other(String),
}

impl Category {
    /// Categories offered by the admin form and the gallery filter
    pub const SELECTABLE: [Category; 3] = [
        Category::Medical,
        Category::Residential,
        Category::Commercial,
    ];

    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "medical" => Self::Medical,
            "residential" => Self::Residential,
            "commercial" => Self::Commercial,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Medical => "Medical",
            Self::Residential => "Residential",
            Self::Commercial => "Commercial",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

/// Project as it arrives on the wire
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(rename = "_id", default)]
    pub object_id: Option<String>,
    /// Legacy numeric id
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_images")]
    pub images: Option<Vec<String>>,
    /// Legacy single image
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("record '{0}' has no identifier")]
    MissingId(String),
    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Accept a list, a single string or null. Non-string entries are dropped.
fn lenient_images<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(url)) => Some(vec![url]),
        Some(Value::Array(entries)) => Some(
            entries
                .into_iter()
                .filter_map(|entry| match entry {
                    Value::String(url) => Some(url),
                    other => {
                        tracing::debug!("Dropping image entry {}", other);
                        None
                    }
                })
                .collect(),
        ),
        Some(other) => {
            tracing::warn!("Ignoring malformed images field: {}", other);
            None
        }
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Normalized project used everywhere past the ingestion boundary
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub images: ImageSequence,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Normalize a raw `/projects` listing.
    ///
    /// Each element is decoded on its own so one malformed record is skipped
    /// instead of failing the whole list.
    pub fn from_records(records: Vec<Value>) -> Vec<Project> {
        records
            .into_iter()
            .filter_map(|value| match Project::from_value(value) {
                Ok(project) => Some(project),
                Err(e) => {
                    tracing::warn!("Skipping project: {}", e);
                    None
                }
            })
            .collect()
    }

    fn from_value(value: Value) -> Result<Project, RecordError> {
        let record: ProjectRecord =
            serde_json::from_value(value).map_err(|e| RecordError::Malformed(e.to_string()))?;
        Project::try_from(record)
    }

    /// First image, used by the admin list
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

impl TryFrom<ProjectRecord> for Project {
    type Error = RecordError;

    fn try_from(record: ProjectRecord) -> Result<Self, Self::Error> {
        let id = super::resolve_record_id(record.object_id, record.id)
            .ok_or_else(|| RecordError::MissingId(record.title.clone()))?;

        Ok(Self {
            id,
            title: record.title,
            description: record.description,
            category: Category::parse(&record.category),
            images: normalize_images(record.images, record.image),
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Collapse the `images` / legacy `image` pair into one ordered list.
///
/// A non-empty `images` list wins; otherwise a non-blank `image` becomes a
/// one-element list; otherwise the project has no images.
pub fn normalize_images(images: Option<Vec<String>>, image: Option<String>) -> ImageSequence {
    let list: Vec<String> = images
        .unwrap_or_default()
        .into_iter()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect();

    if !list.is_empty() {
        return list.into();
    }

    match image.map(|url| url.trim().to_string()) {
        Some(url) if !url.is_empty() => vec![url].into(),
        _ => Vec::new().into(),
    }
}

/// Where an image in a draft comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Already hosted; sent back so the server keeps it
    Existing(String),
    /// Local file to upload
    Upload(PathBuf),
}

impl ImageSource {
    /// Parse one line of the image list: URLs are kept, anything else is a file path
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if line.starts_with("http://") || line.starts_with("https://") {
            Some(Self::Existing(line.to_string()))
        } else {
            Some(Self::Upload(PathBuf::from(line)))
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Existing(url) => f.write_str(url),
            Self::Upload(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error("Please upload at least one image")]
    NoImages,
}

/// Create/update payload built by the project form
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    pub images: Vec<ImageSource>,
}

impl ProjectDraft {
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            category: Some(project.category.clone()),
            images: project
                .images
                .iter()
                .map(|url| ImageSource::Existing(url.clone()))
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty()
            || self.description.trim().is_empty()
            || self.category.is_none()
        {
            return Err(DraftError::MissingFields);
        }
        if self.images.is_empty() {
            return Err(DraftError::NoImages);
        }
        Ok(())
    }

    pub fn existing_images(&self) -> impl Iterator<Item = &str> {
        self.images.iter().filter_map(|source| match source {
            ImageSource::Existing(url) => Some(url.as_str()),
            ImageSource::Upload(_) => None,
        })
    }

    pub fn uploads(&self) -> impl Iterator<Item = &PathBuf> {
        self.images.iter().filter_map(|source| match source {
            ImageSource::Upload(path) => Some(path),
            ImageSource::Existing(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ProjectRecord {
        serde_json::from_value(value).expect("valid record")
    }

    #[test]
    fn test_images_list_wins_over_legacy_image() {
        let project = Project::try_from(record(json!({
            "_id": "p1",
            "title": "MRI Suite",
            "description": "Shielded room",
            "category": "Medical",
            "images": ["a.jpg", "b.jpg"],
            "image": "legacy.jpg",
            "createdAt": "2024-05-01T10:00:00Z"
        })))
        .unwrap();

        assert_eq!(&*project.images, &["a.jpg".to_string(), "b.jpg".to_string()]);
        assert_eq!(project.category, Category::Medical);
        assert!(project.created_at.is_some());
    }

    #[test]
    fn test_legacy_image_becomes_single_entry() {
        let project = Project::try_from(record(json!({
            "id": 3,
            "title": "Villa",
            "category": "residential",
            "images": [],
            "image": "villa.jpg"
        })))
        .unwrap();

        assert_eq!(project.id, "3");
        assert_eq!(&*project.images, &["villa.jpg".to_string()]);
        assert_eq!(project.category, Category::Residential);
    }

    #[test]
    fn test_no_images_at_all_is_empty() {
        let images = normalize_images(None, Some("   ".to_string()));
        assert!(images.is_empty());
    }

    #[test]
    fn test_records_without_id_are_skipped() {
        let projects = Project::from_records(vec![
            json!({"title": "orphan"}),
            json!({"_id": "ok", "title": "kept"}),
        ]);
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].title, "kept");
    }

    #[test]
    fn test_bad_image_entries_are_dropped() {
        let listing: Vec<Value> = serde_json::from_str(
            r#"[
                {"_id": "a", "title": "Clinic", "images": ["x.jpg"]},
                {"_id": "b", "title": "Ward", "images": [null, "z.jpg", 7]}
            ]"#,
        )
        .unwrap();
        let projects = Project::from_records(listing);
        assert_eq!(projects.len(), 2);
        assert_eq!(&*projects[1].images, &["z.jpg".to_string()]);
    }

    #[test]
    fn test_images_as_single_string() {
        let project = Project::try_from(record(json!({
            "_id": "p1",
            "title": "Lobby",
            "images": "only.jpg"
        })))
        .unwrap();
        assert_eq!(&*project.images, &["only.jpg".to_string()]);
    }

    #[test]
    fn test_malformed_images_fall_back_to_placeholder() {
        let project = Project::try_from(record(json!({
            "_id": "p1",
            "title": "Lobby",
            "images": {"url": "x.jpg"},
            "image": 12
        })))
        .unwrap();
        assert!(project.images.is_empty());
    }

    #[test]
    fn test_undecodable_record_is_skipped() {
        let projects = Project::from_records(vec![
            json!({"_id": "bad", "title": 42}),
            json!({"_id": "ok", "title": "kept"}),
        ]);
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, "ok");
    }

    #[test]
    fn test_unknown_category_is_preserved() {
        assert_eq!(Category::parse(" Hospitality "), Category::Other("Hospitality".into()));
        assert_eq!(Category::parse("COMMERCIAL"), Category::Commercial);
    }

    #[test]
    fn test_image_source_parsing() {
        assert_eq!(
            ImageSource::parse(" https://cdn.example.com/x.jpg "),
            Some(ImageSource::Existing("https://cdn.example.com/x.jpg".into()))
        );
        assert_eq!(
            ImageSource::parse("./photos/room.png"),
            Some(ImageSource::Upload(PathBuf::from("./photos/room.png")))
        );
        assert_eq!(ImageSource::parse("   "), None);
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = ProjectDraft {
            title: "Clinic".into(),
            description: "Waiting area".into(),
            category: None,
            images: vec![],
        };
        assert_eq!(draft.validate(), Err(DraftError::MissingFields));

        draft.category = Some(Category::Commercial);
        assert_eq!(draft.validate(), Err(DraftError::NoImages));

        draft.images.push(ImageSource::Upload(PathBuf::from("lobby.jpg")));
        assert_eq!(draft.validate(), Ok(()));
        assert_eq!(draft.uploads().count(), 1);
        assert_eq!(draft.existing_images().count(), 0);
    }
}
