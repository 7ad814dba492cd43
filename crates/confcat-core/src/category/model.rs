//! Category domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Store-assigned category identifier. `0` means "not yet persisted".
pub type CategoryId = i64;

/// Store-assigned condition identifier. `0` means "not yet persisted".
pub type ConditionId = i64;

/// The kind of predicate a condition expresses.
///
/// The set is closed. Values that do not name a known kind deserialize to
/// `Unrecognized`, which the predicate compiler ignores.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum ConditionType {
    /// Session must carry the named tag.
    IncludeTag,
    /// Session must not carry the named tag.
    ExcludeTag,
    /// Session location must equal the value.
    Location,
    /// Session must start at or after the value (a timestamp).
    StartDateMin,
    /// Session must start at or before the value (a timestamp).
    StartDateMax,
    /// Placeholder for kinds written by a newer schema.
    #[serde(other)]
    Unrecognized,
}

impl ConditionType {
    /// Kinds where only the first occurrence on a category takes effect.
    pub fn is_singleton(self) -> bool {
        matches!(
            self,
            Self::Location | Self::StartDateMin | Self::StartDateMax
        )
    }
}

/// One typed predicate rule attached to a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub id: ConditionId,
    /// Owning category (back-reference only).
    pub category_id: CategoryId,
    #[serde(rename = "type")]
    pub condition_type: ConditionType,
    /// Payload interpreted according to `condition_type`.
    pub value: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Condition {
    /// Creates an unsaved condition.
    pub fn new(condition_type: ConditionType, value: impl Into<String>) -> Self {
        Self {
            id: 0,
            category_id: 0,
            condition_type,
            value: value.into(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn include_tag(tag: impl Into<String>) -> Self {
        Self::new(ConditionType::IncludeTag, tag)
    }

    pub fn exclude_tag(tag: impl Into<String>) -> Self {
        Self::new(ConditionType::ExcludeTag, tag)
    }

    pub fn location(location: impl Into<String>) -> Self {
        Self::new(ConditionType::Location, location)
    }

    pub fn start_date_min(value: impl Into<String>) -> Self {
        Self::new(ConditionType::StartDateMin, value)
    }

    pub fn start_date_max(value: impl Into<String>) -> Self {
        Self::new(ConditionType::StartDateMax, value)
    }

    /// Returns true when the store has not assigned an id yet.
    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}

/// A named, saved filter definition over sessions.
///
/// Conditions keep their insertion order for display and editing. The
/// order has no effect on which sessions match, except that singleton kinds
/// (see [`ConditionType::is_singleton`]) honour the first occurrence only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl Category {
    /// Maximum accepted length of a category name.
    pub const MAX_NAME_LEN: usize = 100;
    /// Maximum accepted length of a category description.
    pub const MAX_DESCRIPTION_LEN: usize = 500;
    /// Maximum accepted length of a condition value.
    pub const MAX_CONDITION_VALUE_LEN: usize = 500;

    /// Creates an unsaved category without conditions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: None,
            created_at: Utc::now(),
            updated_at: None,
            conditions: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }
}
