//! Response and request shapes exposed to callers.
//!
//! Sessions are flattened for the wire: tags become sorted names and
//! speakers lose their audit fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use confcat_core::category::{Category, CategoryId, Condition, ConditionId, ConditionType};
use confcat_core::query::PagedResult;
use confcat_core::session::{Session, SessionId, Speaker, SpeakerId, Tag, TagId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerDto {
    pub id: SpeakerId,
    pub name: String,
    pub bio: String,
    pub profile_image: String,
}

impl From<&Speaker> for SpeakerDto {
    fn from(speaker: &Speaker) -> Self {
        Self {
            id: speaker.id,
            name: speaker.name.clone(),
            bio: speaker.bio.clone(),
            profile_image: speaker.profile_image.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub id: SessionId,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub is_online: bool,
    /// Tag names, sorted.
    pub tags: Vec<String>,
    pub speakers: Vec<SpeakerDto>,
}

impl From<Session> for SessionDto {
    fn from(session: Session) -> Self {
        let mut tags: Vec<String> = session.tags.into_iter().map(|t| t.name).collect();
        tags.sort();
        Self {
            id: session.id,
            title: session.title,
            description: session.description,
            start_date: session.start_date,
            end_date: session.end_date,
            location: session.location,
            is_online: session.is_online,
            tags,
            speakers: session.speakers.iter().map(SpeakerDto::from).collect(),
        }
    }
}

/// Paged envelope of sessions.
///
/// `sessions` repeats `items` for web clients that read that field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedSessionsDto {
    pub items: Vec<SessionDto>,
    pub sessions: Vec<SessionDto>,
    pub total_count: usize,
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: usize,
}

impl From<PagedResult<Session>> for PagedSessionsDto {
    fn from(result: PagedResult<Session>) -> Self {
        let page = result.map(SessionDto::from);
        Self {
            sessions: page.items.clone(),
            items: page.items,
            total_count: page.total_count,
            current_page: page.current_page,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionDto {
    /// 0 for a condition not stored yet.
    #[serde(default)]
    pub id: ConditionId,
    #[serde(default)]
    pub category_id: CategoryId,
    #[serde(rename = "type")]
    pub condition_type: ConditionType,
    pub value: String,
}

impl From<&Condition> for ConditionDto {
    fn from(condition: &Condition) -> Self {
        Self {
            id: condition.id,
            category_id: condition.category_id,
            condition_type: condition.condition_type,
            value: condition.value.clone(),
        }
    }
}

impl ConditionDto {
    pub fn new(condition_type: ConditionType, value: impl Into<String>) -> Self {
        Self {
            id: 0,
            category_id: 0,
            condition_type,
            value: value.into(),
        }
    }

    pub(crate) fn into_domain(self, category_id: CategoryId) -> Condition {
        let mut condition = Condition::new(self.condition_type, self.value);
        condition.id = self.id;
        condition.category_id = category_id;
        condition
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    #[serde(default)]
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Filled by the store; ignored on input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub conditions: Vec<ConditionDto>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            created_at: Some(category.created_at),
            updated_at: category.updated_at,
            conditions: category.conditions.iter().map(ConditionDto::from).collect(),
        }
    }
}

impl CategoryDto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: None,
            created_at: None,
            updated_at: None,
            conditions: Vec::new(),
        }
    }

    pub fn with_condition(mut self, condition_type: ConditionType, value: impl Into<String>) -> Self {
        self.conditions.push(ConditionDto::new(condition_type, value));
        self
    }

    pub(crate) fn into_domain(self) -> Category {
        let id = self.id;
        let mut category = Category::new(self.name.trim());
        category.id = id;
        category.description = self.description;
        category.conditions = self
            .conditions
            .into_iter()
            .map(|c| c.into_domain(id))
            .collect();
        category
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    pub id: TagId,
    pub name: String,
    pub description: String,
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            description: tag.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use confcat_core::query::PageRequest;

    #[test]
    fn test_session_dto_flattens_and_sorts_tags() {
        let start = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
        let mut session = Session::new("Intro", "Online", start, start);
        session.tags = vec![Tag::new("rust"), Tag::new("aws")];
        let mut speaker = Speaker::new("Ada Lovelace");
        speaker.profile_image = "ada.png".to_string();
        session.speakers.push(speaker);

        let dto = SessionDto::from(session);
        assert_eq!(dto.tags, vec!["aws", "rust"]);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["speakers"][0]["profileImage"], "ada.png");
        assert!(json.get("status").is_none());
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn test_paged_envelope_carries_sessions_alias() {
        let start = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
        let result = PagedResult::new(
            vec![Session::new("Intro", "Online", start, start)],
            5,
            PageRequest::new(1, 2),
        );

        let json = serde_json::to_value(PagedSessionsDto::from(result)).unwrap();
        assert_eq!(json["items"], json["sessions"]);
        assert_eq!(json["totalCount"], 5);
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["pageSize"], 2);
        assert_eq!(json["totalPages"], 3);
    }

    #[test]
    fn test_category_dto_parses_condition_type_names() {
        let dto: CategoryDto = serde_json::from_str(
            r#"{"name":"Cloud","conditions":[{"type":"IncludeTag","value":"aws"},{"type":"Bogus","value":"x"}]}"#,
        )
        .unwrap();
        assert_eq!(dto.id, 0);
        assert_eq!(dto.conditions[0].condition_type, ConditionType::IncludeTag);
        assert_eq!(dto.conditions[1].condition_type, ConditionType::Unrecognized);
    }
}
