//! Pagination request and the paged result envelope.

use serde::{Deserialize, Serialize};

/// Default number of items per page when the caller does not say.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A 1-based page window.
///
/// No clamping happens here. Rejecting `page < 1` or `page_size < 1` is the
/// job of the caller-facing layer; the arithmetic below saturates instead of
/// underflowing so that a stray zero never panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Number of matching items to skip: `(page - 1) * page_size`.
    pub fn skip(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.page_size as usize)
    }

    /// Number of items to take after skipping.
    pub fn take(&self) -> usize {
        self.page_size as usize
    }
}

/// One page of matches plus total-count metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    /// Items of the requested page, at most `page_size` of them.
    pub items: Vec<T>,
    /// Number of items matching the filter, independent of pagination.
    pub total_count: usize,
    pub current_page: u32,
    pub page_size: u32,
    /// `ceil(total_count / page_size)`, or 0 when `page_size` is 0.
    pub total_pages: usize,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: usize, request: PageRequest) -> Self {
        Self {
            items,
            total_count,
            current_page: request.page,
            page_size: request.page_size,
            total_pages: total_pages(total_count, request.page_size),
        }
    }

    /// The zero-result page returned for unknown categories.
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Converts every item while keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> PagedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            current_page: self.current_page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

fn total_pages(total_count: usize, page_size: u32) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size as usize)
}
