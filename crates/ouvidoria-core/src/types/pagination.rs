//! Pagination types for the audit log listing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Number of entries per page, restricted to a fixed allowed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct PageSize(u64);

impl PageSize {
    /// Page sizes offered by the listing.
    pub const ALLOWED: [u64; 4] = [10, 25, 50, 100];

    /// Size used when nothing else is configured.
    pub const DEFAULT: PageSize = PageSize(25);

    /// The raw number of entries per page.
    pub fn get(self) -> u64 {
        self.0
    }

    /// Every allowed page size, smallest first.
    pub fn all() -> impl Iterator<Item = PageSize> {
        Self::ALLOWED.into_iter().map(PageSize)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u64> for PageSize {
    type Error = AppError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if Self::ALLOWED.contains(&value) {
            Ok(Self(value))
        } else {
            Err(AppError::validation(format!(
                "page size {value} is not one of {:?}",
                Self::ALLOWED
            )))
        }
    }
}

impl From<PageSize> for u64 {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of pages needed to show `total_count` entries.
///
/// An empty result still occupies one (empty) page.
pub fn total_pages(total_count: u64, page_size: PageSize) -> u64 {
    if total_count == 0 {
        1
    } else {
        total_count.div_ceil(page_size.get())
    }
}

/// Normalized payload of one listing response: `{ count, results }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogPage<T> {
    /// Entries on this page, newest first by backend convention.
    #[serde(rename = "results")]
    pub items: Vec<T>,
    /// Total matching entries across all pages.
    #[serde(rename = "count")]
    pub total_count: u64,
}

impl<T> LogPage<T> {
    /// A page with no entries.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

/// A fetched page together with the cursor it was requested for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: PageSize,
    /// Total number of items across all pages.
    pub total_count: u64,
    /// Total number of pages, at least 1.
    pub total_pages: u64,
}

impl<T> PageResult<T> {
    /// Build a page result, truncating `items` to the page size.
    pub fn new(mut items: Vec<T>, page: u64, page_size: PageSize, total_count: u64) -> Self {
        items.truncate(page_size.get() as usize);
        if total_count == 0 {
            items.clear();
        }
        Self {
            items,
            page,
            page_size,
            total_count,
            total_pages: total_pages(total_count, page_size),
        }
    }

    /// Whether nothing matched the filter.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Whether there is a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether there is a previous page.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
