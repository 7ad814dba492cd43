//! Reference query executor: filter, count, sort, paginate.
//!
//! This is the behavioural contract for every [`crate::session::SessionIndex`]
//! implementation. In-memory stores call it directly; a database-backed
//! index must produce the same pages.

use super::filter::SessionFilter;
use super::page::{PageRequest, PagedResult};
use super::sort::SortSpec;
use crate::session::Session;

/// Runs a query over a full snapshot of sessions.
///
/// `total_count` is taken after filtering and before pagination, from the
/// same filtered set the page is cut from. A page past the end yields no
/// items and the unchanged total.
pub fn execute<'a, I>(
    sessions: I,
    filter: &SessionFilter,
    sort: &SortSpec,
    page: PageRequest,
) -> PagedResult<Session>
where
    I: IntoIterator<Item = &'a Session>,
{
    let mut matched: Vec<&Session> = sessions
        .into_iter()
        .filter(|session| filter.matches(session))
        .collect();
    let total_count = matched.len();

    matched.sort_by(|a, b| sort.compare(a, b));

    let items = matched
        .into_iter()
        .skip(page.skip())
        .take(page.take())
        .cloned()
        .collect();

    PagedResult::new(items, total_count, page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Predicate, SortField};
    use crate::session::Tag;
    use chrono::{TimeZone, Utc};

    fn catalog() -> Vec<Session> {
        let specs = [
            (1, "Delta", "Online", &["aws"][..], 4),
            (2, "Alpha", "Berlin", &["aws", "rust"][..], 2),
            (3, "Charlie", "Online", &["rust"][..], 3),
            (4, "Bravo", "Online", &["aws"][..], 1),
            (5, "Alpha", "Online", &["aws"][..], 5),
        ];
        specs
            .iter()
            .map(|(id, title, location, tags, day)| {
                let start = Utc.with_ymd_and_hms(2025, 1, *day, 9, 0, 0).unwrap();
                let mut s = Session::new(*title, *location, start, start);
                s.id = *id;
                s.tags = tags.iter().map(|t| Tag::new(*t)).collect();
                s
            })
            .collect()
    }

    fn ids(result: &PagedResult<Session>) -> Vec<i64> {
        result.items.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_unrestricted_query_returns_all_by_start_date() {
        let sessions = catalog();
        let result = execute(
            &sessions,
            &SessionFilter::all(),
            &SortSpec::default(),
            PageRequest::new(1, 10),
        );
        assert_eq!(result.total_count, 5);
        assert_eq!(ids(&result), vec![4, 2, 3, 1, 5]);
    }

    #[test]
    fn test_total_count_is_independent_of_page() {
        let sessions = catalog();
        let filter = SessionFilter::all().and(Predicate::has_tag("aws"));
        let sort = SortSpec::default();

        let first = execute(&sessions, &filter, &sort, PageRequest::new(1, 2));
        let second = execute(&sessions, &filter, &sort, PageRequest::new(2, 2));

        assert_eq!(first.total_count, 4);
        assert_eq!(second.total_count, 4);
        assert_eq!(first.total_pages, 2);
        assert_eq!(ids(&first), vec![4, 2]);
        assert_eq!(ids(&second), vec![1, 5]);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let sessions = catalog();
        let result = execute(
            &sessions,
            &SessionFilter::all(),
            &SortSpec::default(),
            PageRequest::new(7, 2),
        );
        assert!(result.items.is_empty());
        assert_eq!(result.total_count, 5);
        assert_eq!(result.current_page, 7);
    }

    #[test]
    fn test_title_sort_is_reversible_with_id_tie_break() {
        let sessions = catalog();
        let asc = execute(
            &sessions,
            &SessionFilter::all(),
            &SortSpec::new(SortField::Title, true),
            PageRequest::new(1, 10),
        );
        let desc = execute(
            &sessions,
            &SessionFilter::all(),
            &SortSpec::new(SortField::Title, false),
            PageRequest::new(1, 10),
        );

        assert_eq!(ids(&asc), vec![2, 5, 4, 3, 1]);
        let mut reversed = ids(&desc);
        reversed.reverse();
        assert_eq!(ids(&asc), reversed);
        assert!(asc.items.windows(2).all(|w| w[0].title <= w[1].title));
    }

    #[test]
    fn test_repeated_query_is_identical() {
        let sessions = catalog();
        let filter = SessionFilter::all().and(Predicate::location_is("online"));
        let sort = SortSpec::new(SortField::Location, true);
        let page = PageRequest::new(1, 3);

        assert_eq!(
            execute(&sessions, &filter, &sort, page),
            execute(&sessions, &filter, &sort, page)
        );
    }
}
