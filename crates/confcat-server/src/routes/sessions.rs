use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use confcat_application::PagedSessionsDto;
use confcat_core::category::CategoryId;
use confcat_core::config::PagingConfig;
use confcat_core::query::{PageRequest, SortSpec};

use crate::ServerState;
use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionsQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_by: Option<String>,
    pub ascending: Option<bool>,
}

impl SessionsQuery {
    /// Applies defaults and rejects paging values the engine cannot serve.
    pub(crate) fn page_request(&self, paging: &PagingConfig) -> Result<PageRequest, ApiError> {
        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err(ApiError::bad_request("page must be at least 1"));
        }

        let page_size = self
            .page_size
            .unwrap_or_else(|| i64::from(paging.default_page_size));
        if page_size < 1 || page_size > i64::from(paging.max_page_size) {
            return Err(ApiError::bad_request(format!(
                "pageSize must be between 1 and {}",
                paging.max_page_size
            )));
        }

        let page = u32::try_from(page).map_err(|_| ApiError::bad_request("page is too large"))?;
        // bounded by max_page_size above
        let page_size = page_size as u32;
        Ok(PageRequest::new(page, page_size))
    }

    pub(crate) fn sort_spec(&self) -> SortSpec {
        SortSpec::from_params(self.sort_by.as_deref(), self.ascending.unwrap_or(true))
    }
}

/// `GET /api/sessions/category/:category_id`
pub(crate) async fn sessions_by_category(
    State(state): State<Arc<ServerState>>,
    ApiPath(category_id): ApiPath<CategoryId>,
    ApiQuery(query): ApiQuery<SessionsQuery>,
) -> Result<Json<PagedSessionsDto>, ApiError> {
    let page = query.page_request(&state.paging)?;
    let sort = query.sort_spec();

    let deadline = state.deadline();
    let result = state
        .sessions
        .get_sessions_by_category(category_id, page, sort, Some(deadline.token()))
        .await?;

    tracing::debug!(
        target: "confcat::server",
        category_id,
        total = result.total_count,
        returned = result.items.len(),
        "Served category sessions"
    );
    Ok(Json(result))
}
