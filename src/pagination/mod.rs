//! Pagination - page slices and page metadata over an ordered view.
//!
//! `items` and `PageInfo` must be derived from the same `total`; the store
//! computes both under one read guard.
//!
//! A `limit` of zero yields an empty slice with `currentPage = 1` and
//! `totalPages = 1`, or `0` when the collection is empty.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Offset/limit pair for a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub offset: usize,
    pub limit: usize,
}

/// Page metadata returned alongside listed items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub current_page: usize,
    pub total_pages: usize,
}

/// A slice of items together with the metadata describing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

/// Compute page metadata for a snapshot of `total` items.
pub fn paginate(total: usize, offset: usize, limit: usize) -> PageInfo {
    let (current_page, total_pages) = if limit == 0 {
        (1, usize::from(total > 0))
    } else {
        ((offset / limit).saturating_add(1), total.div_ceil(limit))
    };
    PageInfo {
        total,
        limit,
        offset,
        current_page,
        total_pages,
    }
}

/// Index range of the page inside a view of `total` items.
///
/// Always in bounds; its length is `min(limit, total - offset)`, or zero
/// when `offset >= total`.
pub fn slice_bounds(total: usize, offset: usize, limit: usize) -> Range<usize> {
    let start = offset.min(total);
    let end = start.saturating_add(limit).min(total);
    start..end
}
