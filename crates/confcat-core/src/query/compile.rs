//! Predicate compiler.
//!
//! Translates a category's ordered conditions into one [`SessionFilter`].
//! Compilation never fails: a condition that cannot be applied is reported
//! as an [`InertCondition`] and contributes no restriction.
//!
//! Policy for duplicated singleton kinds (`Location`, `StartDateMin`,
//! `StartDateMax`): the first occurrence in stored order decides, even when
//! that occurrence turns out to be inert. Later ones are shadowed.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use super::filter::{Predicate, SessionFilter};
use crate::category::{Condition, ConditionId, ConditionType};

/// Accepted naive date-time layouts, interpreted as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Why a condition did not restrict the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InertReason {
    /// Date value could not be parsed.
    UnparseableDate,
    /// Value is empty where a non-empty one is required.
    EmptyValue,
    /// The condition type is not known to this build.
    UnrecognizedType,
    /// An earlier condition of the same singleton kind already decided.
    Shadowed,
}

/// Diagnostic record for a condition that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InertCondition {
    pub condition_id: ConditionId,
    pub condition_type: ConditionType,
    pub value: String,
    pub reason: InertReason,
}

/// Output of [`compile`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilter {
    pub filter: SessionFilter,
    pub inert: Vec<InertCondition>,
}

impl CompiledFilter {
    /// Returns true if some condition other than a shadowed duplicate was
    /// skipped, i.e. the category likely carries bad data.
    pub fn has_data_quality_issues(&self) -> bool {
        self.inert
            .iter()
            .any(|c| c.reason != InertReason::Shadowed)
    }
}

/// Compiles conditions into a conjunctive filter.
///
/// An empty slice yields the always-true filter.
pub fn compile(conditions: &[Condition]) -> CompiledFilter {
    let mut predicates = Vec::with_capacity(conditions.len());
    let mut skipped = Vec::new();
    let mut decided: HashSet<ConditionType> = HashSet::new();

    for condition in conditions {
        let kind = condition.condition_type;

        if kind.is_singleton() && !decided.insert(kind) {
            skipped.push(inert(condition, InertReason::Shadowed));
            continue;
        }

        match compile_one(condition) {
            Ok(predicate) => predicates.push(predicate),
            Err(reason) => skipped.push(inert(condition, reason)),
        }
    }

    CompiledFilter {
        filter: SessionFilter::from_predicates(predicates),
        inert: skipped,
    }
}

fn compile_one(condition: &Condition) -> Result<Predicate, InertReason> {
    let value = condition.value.as_str();
    match condition.condition_type {
        ConditionType::IncludeTag => Ok(Predicate::has_tag(value)),
        ConditionType::ExcludeTag => Ok(Predicate::lacks_tag(value)),
        ConditionType::Location => {
            if value.trim().is_empty() {
                Err(InertReason::EmptyValue)
            } else {
                Ok(Predicate::location_is(value))
            }
        }
        ConditionType::StartDateMin => parse_condition_date(value)
            .map(Predicate::StartsOnOrAfter)
            .ok_or(InertReason::UnparseableDate),
        ConditionType::StartDateMax => parse_condition_date(value)
            .map(Predicate::StartsOnOrBefore)
            .ok_or(InertReason::UnparseableDate),
        ConditionType::Unrecognized => Err(InertReason::UnrecognizedType),
    }
}

fn inert(condition: &Condition, reason: InertReason) -> InertCondition {
    InertCondition {
        condition_id: condition.id,
        condition_type: condition.condition_type,
        value: condition.value.clone(),
        reason,
    }
}

/// Parses a date condition value.
///
/// Accepts RFC 3339 (offset converted to UTC), naive date-times taken as
/// UTC, and bare dates (midnight UTC). Surrounding whitespace is ignored.
pub fn parse_condition_date(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
