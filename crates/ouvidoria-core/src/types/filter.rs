//! Client-owned filter state for the audit log listing.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::action::ActionFilter;
use super::pagination::PageSize;
use crate::error::AppError;

/// Inclusive calendar date range. Either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included.
    pub from: Option<NaiveDate>,
    /// Last day included.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Create a range from optional bounds.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Whether neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Reject ranges whose start lies after their end.
    pub fn validate(&self) -> Result<(), AppError> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Err(AppError::validation(format!(
                "start date {from} is after end date {to}"
            ))),
            _ => Ok(()),
        }
    }

    /// First instant covered by the range (start of `from`).
    pub fn start_instant(&self) -> Option<DateTime<Utc>> {
        self.from.map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }

    /// Last instant covered by the range (end of `to`).
    pub fn end_instant(&self) -> Option<DateTime<Utc>> {
        self.to.and_then(|d| {
            NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).map(|t| d.and_time(t).and_utc())
        })
    }
}

/// Everything that narrows the result set, without the pagination cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    /// Selected action, or all.
    pub action: ActionFilter,
    /// Inclusive date bounds.
    pub date_range: DateRange,
    /// Free-text search, as typed.
    pub search: String,
}

impl FilterCriteria {
    /// The search text with surrounding whitespace removed, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Whether every filter is at its default.
    pub fn is_default(&self) -> bool {
        self.action == ActionFilter::All
            && self.date_range.is_unbounded()
            && self.search_term().is_none()
    }

    /// Check the combination before anything is dispatched.
    pub fn validate(&self) -> Result<(), AppError> {
        self.date_range.validate()
    }
}

/// Full listing state: the criteria plus the pagination cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Narrowing criteria.
    pub criteria: FilterCriteria,
    /// Current page, 1-based.
    pub page: u64,
    /// Entries per page.
    pub page_size: PageSize,
}

impl FilterState {
    /// Create a state on page 1 with the given page size.
    pub fn new(criteria: FilterCriteria, page_size: PageSize) -> Self {
        Self {
            criteria,
            page: 1,
            page_size,
        }
    }

    /// Check every invariant; violations never reach the backend.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.page < 1 {
            return Err(AppError::validation("page must be at least 1"));
        }
        self.criteria.validate()
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(FilterCriteria::default(), PageSize::default())
    }
}
