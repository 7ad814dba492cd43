use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use confcat_application::{CategoryDto, CategoryService, CategorySessionUseCase};
use confcat_core::category::ConditionType;
use confcat_core::query::{PageRequest, SortField, SortSpec};
use confcat_core::session::{Session, Tag};
use confcat_infrastructure::{DataGenerator, InMemoryCatalog};

struct Fixture {
    catalog: Arc<InMemoryCatalog>,
    categories: CategoryService,
    usecase: CategorySessionUseCase,
}

impl Fixture {
    fn new() -> Self {
        let catalog = Arc::new(InMemoryCatalog::new());
        Self {
            categories: CategoryService::new(catalog.clone()),
            usecase: CategorySessionUseCase::new(catalog.clone(), catalog.clone()),
            catalog,
        }
    }

    async fn add_session(&self, title: &str, location: &str, start: DateTime<Utc>, tags: &[&str]) {
        let mut session = Session::new(title, location, start, start + chrono::Duration::hours(1));
        session.tags = tags.iter().map(|t| Tag::new(*t)).collect();
        self.catalog.insert_session(session).await.unwrap();
    }

    async fn category(&self, conditions: &[(ConditionType, &str)]) -> i64 {
        let dto = conditions
            .iter()
            .fold(CategoryDto::new("Test"), |dto, (kind, value)| {
                dto.with_condition(*kind, *value)
            });
        self.categories.create_category(dto).await.unwrap().id
    }
}

fn day(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, day, 9, 0, 0).unwrap()
}

#[tokio::test]
async fn aws_online_category_pages_through_five_matches() {
    let fx = Fixture::new();
    for n in 1..=5 {
        fx.add_session(&format!("Match {}", n), "Online", day(2, n), &["aws", "cloud"])
            .await;
    }
    fx.add_session("Wrong place", "Berlin", day(2, 6), &["aws"]).await;
    fx.add_session("Wrong tag", "Online", day(2, 7), &["gcp"]).await;

    let id = fx
        .category(&[(ConditionType::IncludeTag, "aws"), (ConditionType::Location, "Online")])
        .await;

    let first = fx
        .usecase
        .get_sessions_by_category(id, PageRequest::new(1, 2), SortSpec::default(), None)
        .await
        .unwrap();
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.total_count, 5);
    assert_eq!(first.total_pages, 3);

    let second = fx
        .usecase
        .get_sessions_by_category(id, PageRequest::new(2, 2), SortSpec::default(), None)
        .await
        .unwrap();
    assert_eq!(second.total_count, first.total_count);

    let third = fx
        .usecase
        .get_sessions_by_category(id, PageRequest::new(3, 2), SortSpec::default(), None)
        .await
        .unwrap();
    assert_eq!(third.items.len(), 1);
    assert_eq!(third.items[0].title, "Match 5");

    let beyond = fx
        .usecase
        .get_sessions_by_category(id, PageRequest::new(4, 2), SortSpec::default(), None)
        .await
        .unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_count, 5);
}

#[tokio::test]
async fn january_date_range_is_inclusive() {
    let fx = Fixture::new();
    fx.add_session("Dec", "Online", Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap(), &[])
        .await;
    fx.add_session("Jan start", "Online", Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), &[])
        .await;
    fx.add_session("Jan mid", "Online", day(1, 15), &[]).await;
    fx.add_session("Jan end", "Online", Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap(), &[])
        .await;
    fx.add_session("Feb", "Online", Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(), &[])
        .await;

    let id = fx
        .category(&[
            (ConditionType::StartDateMin, "2025-01-01T00:00:00Z"),
            (ConditionType::StartDateMax, "2025-01-31T23:59:59Z"),
        ])
        .await;

    let page = fx
        .usecase
        .get_sessions_by_category(id, PageRequest::new(1, 10), SortSpec::default(), None)
        .await
        .unwrap();
    let titles: Vec<_> = page.items.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Jan start", "Jan mid", "Jan end"]);
}

#[tokio::test]
async fn unknown_category_yields_empty_page() {
    let fx = Fixture::new();
    fx.add_session("Any", "Online", day(1, 1), &["aws"]).await;

    let page = fx
        .usecase
        .get_sessions_by_category(999_999, PageRequest::new(1, 10), SortSpec::default(), None)
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert!(page.sessions.is_empty());
    assert_eq!(page.total_count, 0);
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn including_and_excluding_the_same_tag_matches_nothing() {
    let fx = Fixture::new();
    fx.add_session("A", "Online", day(1, 1), &["aws"]).await;
    fx.add_session("B", "Online", day(1, 2), &["gcp"]).await;

    let id = fx
        .category(&[(ConditionType::IncludeTag, "aws"), (ConditionType::ExcludeTag, "AWS")])
        .await;

    let page = fx
        .usecase
        .get_sessions_by_category(id, PageRequest::default(), SortSpec::default(), None)
        .await
        .unwrap();
    assert_eq!(page.total_count, 0);
}

#[tokio::test]
async fn include_tag_matches_case_insensitively() {
    let fx = Fixture::new();
    fx.add_session("Upper", "Online", day(1, 1), &["AWS"]).await;
    fx.add_session("Other", "Online", day(1, 2), &["gcp"]).await;

    let id = fx.category(&[(ConditionType::IncludeTag, "aws")]).await;
    let page = fx
        .usecase
        .get_sessions_by_category(id, PageRequest::default(), SortSpec::default(), None)
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].tags, vec!["AWS"]);
}

#[tokio::test]
async fn empty_category_matches_every_session_and_sorts_reversibly() {
    let fx = Fixture::new();
    let anchor = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    DataGenerator::new(42, anchor)
        .generate(&fx.catalog, 120)
        .await
        .unwrap();
    let id = fx.category(&[]).await;

    let asc = fx
        .usecase
        .get_sessions_by_category(
            id,
            PageRequest::new(1, 200),
            SortSpec::new(SortField::Title, true),
            None,
        )
        .await
        .unwrap();
    let desc = fx
        .usecase
        .get_sessions_by_category(
            id,
            PageRequest::new(1, 200),
            SortSpec::new(SortField::Title, false),
            None,
        )
        .await
        .unwrap();

    assert_eq!(asc.total_count, 120);
    assert!(asc.items.windows(2).all(|w| w[0].title <= w[1].title));
    let mut reversed: Vec<_> = desc.items.iter().map(|s| s.id).collect();
    reversed.reverse();
    assert_eq!(asc.items.iter().map(|s| s.id).collect::<Vec<_>>(), reversed);

    let again = fx
        .usecase
        .get_sessions_by_category(
            id,
            PageRequest::new(1, 200),
            SortSpec::new(SortField::Title, true),
            None,
        )
        .await
        .unwrap();
    assert_eq!(again, asc);
}

#[tokio::test]
async fn unparseable_date_condition_is_inert() {
    let fx = Fixture::new();
    fx.add_session("A", "Online", day(1, 1), &[]).await;
    fx.add_session("B", "Berlin", day(3, 1), &[]).await;

    let id = fx
        .category(&[
            (ConditionType::StartDateMin, "sometime soon"),
            (ConditionType::Location, "online"),
        ])
        .await;
    let page = fx
        .usecase
        .get_sessions_by_category(id, PageRequest::default(), SortSpec::default(), None)
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].title, "A");
}
