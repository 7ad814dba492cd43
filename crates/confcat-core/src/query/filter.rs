//! Compiled session filter.
//!
//! A [`SessionFilter`] is a conjunction of [`Predicate`] units. Each unit is
//! plain data, so a storage backend can translate it into its own query
//! language instead of calling [`SessionFilter::matches`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Session;

/// One restriction over a session.
///
/// String operands are stored case-folded (lowercase); comparisons fold the
/// session side the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "operand", rename_all = "camelCase")]
pub enum Predicate {
    /// At least one tag equals the operand.
    HasTag(String),
    /// No tag equals the operand.
    LacksTag(String),
    /// Location equals the operand.
    LocationIs(String),
    /// `start_date >= operand`.
    StartsOnOrAfter(DateTime<Utc>),
    /// `start_date <= operand`.
    StartsOnOrBefore(DateTime<Utc>),
}

impl Predicate {
    pub fn has_tag(name: &str) -> Self {
        Self::HasTag(name.to_lowercase())
    }

    pub fn lacks_tag(name: &str) -> Self {
        Self::LacksTag(name.to_lowercase())
    }

    pub fn location_is(location: &str) -> Self {
        Self::LocationIs(location.to_lowercase())
    }

    pub fn matches(&self, session: &Session) -> bool {
        match self {
            Self::HasTag(tag) => session.has_tag_folded(tag),
            Self::LacksTag(tag) => !session.has_tag_folded(tag),
            Self::LocationIs(location) => session.location.to_lowercase() == *location,
            Self::StartsOnOrAfter(min) => session.start_date >= *min,
            Self::StartsOnOrBefore(max) => session.start_date <= *max,
        }
    }
}

/// Conjunction of predicates. The empty filter matches every session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFilter {
    predicates: Vec<Predicate>,
}

impl SessionFilter {
    /// The always-true filter.
    pub fn all() -> Self {
        Self::default()
    }

    /// Conjunction of `predicates`, in evaluation order.
    pub fn from_predicates(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    /// Adds one more conjunct.
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_unrestricted(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, session: &Session) -> bool {
        self.predicates.iter().all(|p| p.matches(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Tag;
    use chrono::TimeZone;

    fn session(location: &str, tags: &[&str], day: u32) -> Session {
        let start = Utc.with_ymd_and_hms(2025, 1, day, 10, 0, 0).unwrap();
        let mut s = Session::new("Talk", location, start, start);
        s.tags = tags.iter().map(|t| Tag::new(*t)).collect();
        s
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = SessionFilter::all();
        assert!(filter.is_unrestricted());
        assert!(filter.matches(&session("Berlin", &[], 1)));
    }

    #[test]
    fn test_tag_predicates_fold_case() {
        let s = session("Online", &["AWS", "Serverless"], 5);
        assert!(Predicate::has_tag("aws").matches(&s));
        assert!(Predicate::has_tag("SERVERLESS").matches(&s));
        assert!(!Predicate::lacks_tag("Aws").matches(&s));
        assert!(Predicate::lacks_tag("azure").matches(&s));
    }

    #[test]
    fn test_location_folds_case() {
        let s = session("New York", &[], 5);
        assert!(Predicate::location_is("new york").matches(&s));
        assert!(!Predicate::location_is("York").matches(&s));
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let s = session("Online", &[], 15);
        let at = s.start_date;
        assert!(Predicate::StartsOnOrAfter(at).matches(&s));
        assert!(Predicate::StartsOnOrBefore(at).matches(&s));
        assert!(!Predicate::StartsOnOrAfter(at + chrono::Duration::seconds(1)).matches(&s));
    }

    #[test]
    fn test_conjunction_requires_every_predicate() {
        let s = session("Online", &["aws"], 5);
        let filter = SessionFilter::all()
            .and(Predicate::has_tag("aws"))
            .and(Predicate::location_is("online"));
        assert!(filter.matches(&s));

        let stricter = filter.and(Predicate::has_tag("rust"));
        assert!(!stricter.matches(&s));
    }
}
