//! Category-based session query use case.
//!
//! Resolves a saved category to its conditions, compiles them into a filter
//! and asks the session index for one sorted page.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use confcat_core::category::{CategoryId, CategoryRepository};
use confcat_core::error::Result;
use confcat_core::query::{self, InertReason, PageRequest, PagedResult, SortSpec};
use confcat_core::session::SessionIndex;

use crate::cancel::run_cancellable;
use crate::dto::PagedSessionsDto;

/// Answers "which sessions belong to this category?".
///
/// Holds no state between calls; every call reads the stores afresh.
pub struct CategorySessionUseCase {
    categories: Arc<dyn CategoryRepository>,
    sessions: Arc<dyn SessionIndex>,
}

impl CategorySessionUseCase {
    pub fn new(categories: Arc<dyn CategoryRepository>, sessions: Arc<dyn SessionIndex>) -> Self {
        Self {
            categories,
            sessions,
        }
    }

    /// Returns one page of the sessions matching `category_id`.
    ///
    /// An unknown category yields the empty page (`total_count` 0), not an
    /// error. Store failures propagate unchanged. When `cancel` fires, the
    /// pending store call is abandoned and `Cancelled` is returned.
    pub async fn get_sessions_by_category(
        &self,
        category_id: CategoryId,
        page: PageRequest,
        sort: SortSpec,
        cancel: Option<CancellationToken>,
    ) -> Result<PagedSessionsDto> {
        let cancel = cancel.as_ref();

        let category = run_cancellable(
            cancel,
            "category lookup",
            self.categories.find_by_id_with_conditions(category_id),
        )
        .await?;

        let Some(category) = category else {
            tracing::debug!(
                target: "confcat::engine",
                category_id,
                "Unknown category, returning empty page"
            );
            return Ok(PagedResult::empty(page).into());
        };

        let compiled = query::compile(&category.conditions);
        if compiled.has_data_quality_issues() {
            let unusable: Vec<_> = compiled
                .inert
                .iter()
                .filter(|c| c.reason != InertReason::Shadowed)
                .collect();
            tracing::warn!(
                target: "confcat::engine",
                category_id,
                conditions = ?unusable,
                "Ignoring {} condition(s) that cannot be applied",
                unusable.len()
            );
        }
        for shadowed in compiled
            .inert
            .iter()
            .filter(|c| c.reason == InertReason::Shadowed)
        {
            tracing::debug!(
                target: "confcat::engine",
                category_id,
                condition_id = shadowed.condition_id,
                "Condition {} shadowed by an earlier one of the same kind",
                shadowed.condition_type
            );
        }
        tracing::debug!(
            target: "confcat::engine",
            category_id,
            predicates = compiled.filter.predicates().len(),
            page = page.page,
            page_size = page.page_size,
            sort_by = %sort.field,
            ascending = sort.ascending,
            "Compiled category filter"
        );

        let result = run_cancellable(
            cancel,
            "session query",
            self.sessions.query(&compiled.filter, &sort, page),
        )
        .await
        .inspect_err(|e| {
            tracing::error!(target: "confcat::engine", category_id, "Session query failed: {}", e);
        })?;

        if result.is_empty() && result.total_count > 0 {
            tracing::debug!(
                target: "confcat::engine",
                category_id,
                total = result.total_count,
                total_pages = result.total_pages,
                "Requested page {} is past the last page",
                page.page
            );
        }

        Ok(result.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use confcat_core::error::ConfcatError;
    use confcat_core::query::SessionFilter;
    use confcat_core::session::Session;
    use confcat_infrastructure::InMemoryCatalog;

    struct FailingIndex;

    #[async_trait]
    impl SessionIndex for FailingIndex {
        async fn query(
            &self,
            _filter: &SessionFilter,
            _sort: &SortSpec,
            _page: PageRequest,
        ) -> Result<PagedResult<Session>> {
            Err(ConfcatError::data_access("index offline"))
        }

        async fn count_all(&self) -> Result<usize> {
            Err(ConfcatError::data_access("index offline"))
        }
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let created = catalog
            .create(confcat_core::category::Category::new("Any"))
            .await
            .unwrap();
        let usecase = CategorySessionUseCase::new(catalog, Arc::new(FailingIndex));

        let err = usecase
            .get_sessions_by_category(created.id, PageRequest::default(), SortSpec::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ConfcatError::DataAccess(_)));
    }

    #[tokio::test]
    async fn test_cancelled_call_returns_cancelled() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let usecase = CategorySessionUseCase::new(catalog.clone(), catalog);
        let token = CancellationToken::new();
        token.cancel();

        let err = usecase
            .get_sessions_by_category(1, PageRequest::default(), SortSpec::default(), Some(token))
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }
}
