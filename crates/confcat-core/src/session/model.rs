//! Session domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type SessionId = i64;
pub type TagId = i64;
pub type SpeakerId = i64;

/// A label attached to sessions through a many-to-many link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: String::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// A person presenting at one or more sessions. Carried as payload only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub id: SpeakerId,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub profile_image: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Speaker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            bio: String::new(),
            profile_image: String::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// A timed event, hydrated with its tags and speakers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub speakers: Vec<Speaker>,
}

impl Session {
    /// Creates an unsaved session without tags or speakers.
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: String::new(),
            start_date,
            end_date,
            location: location.into(),
            is_online: false,
            status: "Scheduled".to_string(),
            created_at: Utc::now(),
            updated_at: None,
            tags: Vec::new(),
            speakers: Vec::new(),
        }
    }

    /// Returns true if any tag equals `folded_name`, which must already be
    /// lowercased.
    pub fn has_tag_folded(&self, folded_name: &str) -> bool {
        self.tags
            .iter()
            .any(|tag| tag.name.to_lowercase() == folded_name)
    }

    /// Tag names in link order.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.name.as_str())
    }
}
