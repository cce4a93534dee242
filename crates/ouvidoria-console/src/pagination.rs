//! Pagination cursor state machine.

use ouvidoria_core::types::pagination::{self, PageSize};

/// Result of a cursor transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChange {
    /// The cursor moved to the given page.
    Moved(u64),
    /// The requested page was already current.
    Unchanged,
    /// The request contradicted the known page count; the cursor went back to page 1.
    Reset,
}

impl PageChange {
    /// Whether the visible page is different afterwards and needs a fetch.
    pub fn needs_fetch(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Current page, page size and known page count.
///
/// `total_pages` is 1 until the first fetch reports a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    page_size: PageSize,
    total_pages: u64,
}

impl Pagination {
    /// Start on page 1 with an unknown page count.
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page: 1,
            page_size,
            total_pages: 1,
        }
    }

    /// Current page, 1-based.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Entries per page.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Number of pages in the last fetched result set.
    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Move to page `p`. Out-of-range requests reset the cursor to page 1.
    pub fn go_to_page(&mut self, p: u64) -> PageChange {
        if p < 1 || p > self.total_pages {
            let was_first = self.page == 1;
            self.page = 1;
            return if was_first {
                PageChange::Unchanged
            } else {
                PageChange::Reset
            };
        }
        if p == self.page {
            return PageChange::Unchanged;
        }
        self.page = p;
        PageChange::Moved(p)
    }

    /// Advance one page; stays put on the last page.
    pub fn next(&mut self) -> PageChange {
        if self.page >= self.total_pages {
            return PageChange::Unchanged;
        }
        self.go_to_page(self.page + 1)
    }

    /// Go back one page; stays put on the first page.
    pub fn previous(&mut self) -> PageChange {
        if self.page <= 1 {
            return PageChange::Unchanged;
        }
        self.go_to_page(self.page - 1)
    }

    /// Change the page size; the cursor always returns to page 1.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// A new filter produces a new result set, starting at page 1.
    pub fn apply_new_filter(&mut self) {
        self.page = 1;
    }

    /// Record the total count reported by a fetch.
    ///
    /// Returns `true` when the result set shrank below the current cursor and
    /// the cursor was moved back to page 1.
    pub fn sync_total(&mut self, total_count: u64) -> bool {
        self.total_pages = pagination::total_pages(total_count, self.page_size);
        if self.page > self.total_pages {
            self.page = 1;
            true
        } else {
            false
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}
