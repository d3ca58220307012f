use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

/// A portfolio entry. `category` is a soft reference to a Category name,
/// matched by value and never enforced at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub media_type: MediaType,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Create payload. `id` may arrive pre-assigned so media can be uploaded
/// under that id before the record exists.
#[derive(Debug, Clone)]
pub struct ProjectDraft {
    pub id: Option<Uuid>,
    pub title: String,
    pub category: String,
    pub media_type: MediaType,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub description: String,
}

/// Partial update. Absent fields keep the stored value; the optional
/// thumbnail is cleared by passing an empty string, which the schema
/// normalizes to absent.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub media_type: Option<MediaType>,
    pub media_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
}
