//! Page requests and the paged result envelope.
//!
//! A [`PageRequest`] describes one page of a sorted result set: a zero-based
//! page number, a positive page size, and the ordered sort clauses the query
//! applies. Storage adapters answer it with a [`Page`], which keeps the
//! totals handlers need to build pagination metadata.

use serde::Serialize;

use crate::sort::SortClause;

/// Errors raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// A page must hold at least one row.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Description of one page of a sorted result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
    sort: Vec<SortClause>,
}

impl PageRequest {
    /// Build a request for the zero-based page `page_number` of `page_size`
    /// rows, ordered by `sort` (primary clause first).
    ///
    /// # Errors
    ///
    /// [`PageRequestError::ZeroPageSize`] when `page_size` is zero.
    pub fn new(
        page_number: u32,
        page_size: u32,
        sort: Vec<SortClause>,
    ) -> Result<Self, PageRequestError> {
        if page_size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        Ok(Self {
            page_number,
            page_size,
            sort,
        })
    }

    /// Zero-based page number.
    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Rows per page; always positive.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Ordering clauses, primary sort key first.
    #[must_use]
    pub fn sort(&self) -> &[SortClause] {
        &self.sort
    }

    /// Number of rows skipped before this page starts.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page_number) * i64::from(self.page_size)
    }

    /// Maximum number of rows on this page.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

/// One page of items plus the totals backing pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page, in query order.
    pub items: Vec<T>,
    /// Zero-based number of this page.
    pub page_number: u32,
    /// Page size the query used.
    pub page_size: u32,
    /// Total matching items across all pages, not just this one.
    pub total_items: u64,
}

impl<T> Page<T> {
    /// Assemble a page from the request it answers.
    #[must_use]
    pub fn from_request(request: &PageRequest, items: Vec<T>, total_items: u64) -> Self {
        Self {
            items,
            page_number: request.page_number(),
            page_size: request.page_size(),
            total_items,
        }
    }

    /// Total number of pages: the ceiling of `total_items / page_size`.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        let pages = self.total_items.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Whether this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
