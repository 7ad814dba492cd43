//! Sort specification for session queries.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::session::Session;

/// Session field a query can be ordered by.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "camelCase")]
pub enum SortField {
    Title,
    Location,
    #[default]
    StartDate,
    EndDate,
}

impl SortField {
    /// Resolves a caller-supplied field name, ignoring case.
    ///
    /// Missing or unrecognized names fall back to `StartDate`.
    pub fn from_param(name: Option<&str>) -> Self {
        name.and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_default()
    }
}

/// Sort key plus direction.
///
/// Sessions that tie on the key are ordered by id, and the whole ordering
/// (tie-break included) flips with `ascending`, so a descending listing is
/// the exact reverse of the ascending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub field: SortField,
    pub ascending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::StartDate,
            ascending: true,
        }
    }
}

impl SortSpec {
    pub fn new(field: SortField, ascending: bool) -> Self {
        Self { field, ascending }
    }

    /// Builds a spec from raw request parameters.
    pub fn from_params(sort_by: Option<&str>, ascending: bool) -> Self {
        Self::new(SortField::from_param(sort_by), ascending)
    }

    pub fn compare(&self, a: &Session, b: &Session) -> Ordering {
        let primary = match self.field {
            SortField::Title => a.title.cmp(&b.title),
            SortField::Location => a.location.cmp(&b.location),
            SortField::StartDate => a.start_date.cmp(&b.start_date),
            SortField::EndDate => a.end_date.cmp(&b.end_date),
        };
        let ordering = primary.then_with(|| a.id.cmp(&b.id));
        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }
}
