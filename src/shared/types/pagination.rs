//! Pagination primitives
//!
//! `PageRequest` is validated on construction (never clamped), `PageMeta`
//! derives the navigation flags from the request and the total count, and
//! `PageEnvelope` pairs one page of items with its metadata.

use super::errors::{DomainError, DomainResult};

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;
/// Upper bound accepted for `limit`.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Defaults and bounds applied when parsing page requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSettings {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: MAX_PAGE_LIMIT,
        }
    }
}

/// A validated `(page, limit)` pair. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> DomainResult<Self> {
        Self::bounded(page, limit, MAX_PAGE_LIMIT)
    }

    /// Validate `page >= 1` and `1 <= limit <= max_limit`, and that the
    /// resulting offset fits in an `i64`.
    pub fn bounded(page: i64, limit: i64, max_limit: u64) -> DomainResult<Self> {
        if page < 1 {
            return Err(DomainError::validation(
                "page must be greater than or equal to 1",
            ));
        }
        if limit < 1 {
            return Err(DomainError::validation(
                "limit must be greater than or equal to 1",
            ));
        }
        if limit as u64 > max_limit {
            return Err(DomainError::validation(format!(
                "limit must not exceed {}",
                max_limit
            )));
        }
        // The row offset is bound as a signed 64-bit value.
        if (page - 1).checked_mul(limit).is_none() {
            return Err(DomainError::validation(format!(
                "page must not exceed {}",
                (i64::MAX / limit).saturating_add(1)
            )));
        }
        Ok(Self {
            page: page as u64,
            limit: limit as u64,
        })
    }

    pub fn first(limit: i64) -> DomainResult<Self> {
        Self::new(1, limit)
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

/// Navigation metadata for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageMeta {
    pub fn new(current_page: u64, total_items: u64, items_per_page: u64) -> Self {
        let total_pages = if items_per_page == 0 {
            1
        } else {
            total_items.div_ceil(items_per_page).max(1)
        };

        Self {
            current_page,
            total_pages,
            total_items,
            items_per_page,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
        }
    }

    pub fn for_request(request: &PageRequest, total_items: u64) -> Self {
        Self::new(request.page(), total_items, request.limit())
    }
}

/// One page of items plus its navigation metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PageEnvelope<T> {
    pub items: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> PageEnvelope<T> {
    pub fn new(items: Vec<T>, pagination: PageMeta) -> Self {
        Self { items, pagination }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageEnvelope<U> {
        PageEnvelope {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
