//! Catalog snapshot DTOs and migrations.
//!
//! Sessions are stored with tag and speaker id lists instead of embedded
//! copies; loading rehydrates them. Link ids that point at nothing are
//! dropped on load.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use confcat_core::category::Category;
use confcat_core::error::{ConfcatError, Result};
use confcat_core::session::{Session, SessionId, Speaker, SpeakerId, Tag, TagId};

use crate::memory_catalog::{CatalogSnapshot, IdCounters};

// ============================================================================
// Session record
// ============================================================================

/// Session row with its many-to-many links flattened to ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecordV1_0_0 {
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
    pub tag_ids: Vec<TagId>,
    #[serde(default)]
    pub speaker_ids: Vec<SpeakerId>,
}

impl From<&Session> for SessionRecordV1_0_0 {
    fn from(session: &Session) -> Self {
        SessionRecordV1_0_0 {
            id: session.id,
            title: session.title.clone(),
            description: session.description.clone(),
            start_date: session.start_date,
            end_date: session.end_date,
            location: session.location.clone(),
            is_online: session.is_online,
            status: session.status.clone(),
            created_at: session.created_at,
            updated_at: session.updated_at,
            tag_ids: session.tags.iter().map(|t| t.id).collect(),
            speaker_ids: session.speakers.iter().map(|s| s.id).collect(),
        }
    }
}

impl SessionRecordV1_0_0 {
    fn hydrate(self, tags: &HashMap<TagId, &Tag>, speakers: &HashMap<SpeakerId, &Speaker>) -> Session {
        Session {
            id: self.id,
            title: self.title,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            location: self.location,
            is_online: self.is_online,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            tags: self
                .tag_ids
                .iter()
                .filter_map(|id| tags.get(id).map(|t| (*t).clone()))
                .collect(),
            speakers: self
                .speaker_ids
                .iter()
                .filter_map(|id| speakers.get(id).map(|s| (*s).clone()))
                .collect(),
        }
    }
}

// ============================================================================
// Catalog DTOs
// ============================================================================

/// Catalog DTO V1.0.0
#[derive(Debug, Clone, Default, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct CatalogV1_0_0 {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub speakers: Vec<Speaker>,
    #[serde(default)]
    pub sessions: Vec<SessionRecordV1_0_0>,
}

/// Catalog DTO V1.1.0
#[derive(Debug, Clone, Default, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(rename_all = "camelCase")]
pub struct CatalogV1_1_0 {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub speakers: Vec<Speaker>,
    #[serde(default)]
    pub sessions: Vec<SessionRecordV1_0_0>,
    #[serde(default)]
    pub ids: IdCounters,
}

/// Adds id counters. They start at zero and are raised to the largest
/// stored id when the snapshot is opened.
impl MigratesTo<CatalogV1_1_0> for CatalogV1_0_0 {
    fn migrate(self) -> CatalogV1_1_0 {
        CatalogV1_1_0 {
            categories: self.categories,
            tags: self.tags,
            speakers: self.speakers,
            sessions: self.sessions,
            ids: IdCounters::default(),
        }
    }
}

impl IntoDomain<CatalogSnapshot> for CatalogV1_1_0 {
    fn into_domain(self) -> CatalogSnapshot {
        let sessions = {
            let tags: HashMap<TagId, &Tag> = self.tags.iter().map(|t| (t.id, t)).collect();
            let speakers: HashMap<SpeakerId, &Speaker> =
                self.speakers.iter().map(|s| (s.id, s)).collect();
            self.sessions
                .into_iter()
                .map(|record| record.hydrate(&tags, &speakers))
                .collect()
        };

        CatalogSnapshot {
            categories: self.categories,
            tags: self.tags,
            speakers: self.speakers,
            sessions,
            ids: self.ids,
        }
    }
}

impl FromDomain<CatalogSnapshot> for CatalogV1_1_0 {
    fn from_domain(snapshot: CatalogSnapshot) -> Self {
        CatalogV1_1_0 {
            sessions: snapshot.sessions.iter().map(SessionRecordV1_0_0::from).collect(),
            categories: snapshot.categories,
            tags: snapshot.tags,
            speakers: snapshot.speakers,
            ids: snapshot.ids,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for the catalog snapshot.
pub fn create_catalog_migrator() -> Result<version_migrate::Migrator> {
    version_migrate::migrator!("catalog" => [
        CatalogV1_0_0,
        CatalogV1_1_0,
        CatalogSnapshot
    ], save = true)
    .map_err(|e| ConfcatError::migration(format!("Failed to create catalog migrator: {}", e)))
}
