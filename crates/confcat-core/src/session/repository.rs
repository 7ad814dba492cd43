//! Session index and tag repository traits.

use super::model::{Session, Tag};
use crate::error::Result;
use crate::query::{PageRequest, PagedResult, SessionFilter, SortSpec};
use async_trait::async_trait;

/// Read-only query capability over the session catalog.
///
/// Implementations may push the filter down to a storage-level query, but
/// must behave exactly like [`crate::query::execute`] applied to the full
/// data set: the total count and the returned page come from the same
/// filter evaluated against one snapshot.
#[async_trait]
pub trait SessionIndex: Send + Sync {
    /// Filters, sorts and paginates sessions in one call.
    ///
    /// # Arguments
    ///
    /// * `filter` - Conjunctive predicate over tags, location and start date
    /// * `sort` - Sort key and direction (ties are broken by session id)
    /// * `page` - 1-based page and page size
    ///
    /// # Returns
    ///
    /// The requested page with the total number of matching sessions.
    async fn query(
        &self,
        filter: &SessionFilter,
        sort: &SortSpec,
        page: PageRequest,
    ) -> Result<PagedResult<Session>>;

    /// Total number of sessions in the index, unfiltered.
    async fn count_all(&self) -> Result<usize>;
}

/// Read access to the tag vocabulary.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Lists all tags ordered by name.
    async fn list_all(&self) -> Result<Vec<Tag>>;

    /// Finds a tag by name, ignoring case.
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>>;
}
