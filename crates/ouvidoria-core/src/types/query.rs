//! Canonical query construction.
//!
//! The same mapping feeds the listing, summary and export endpoints, so an
//! export always reproduces exactly what the listing shows. Parameters are
//! emitted in key order and only when their filter is active.

use std::fmt;

use serde::Serialize;

use super::filter::{DateRange, FilterCriteria, FilterState};
use crate::result::AppResult;

/// Calendar format used for `date_from` / `date_to`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parameter keys understood by the backend.
pub mod keys {
    /// Selected action.
    pub const ACTION: &str = "action";
    /// First day included.
    pub const DATE_FROM: &str = "date_from";
    /// Last day included.
    pub const DATE_TO: &str = "date_to";
    /// 1-based page number.
    pub const PAGE: &str = "page";
    /// Entries per page.
    pub const PAGE_SIZE: &str = "page_size";
    /// Free-text search.
    pub const SEARCH: &str = "search";
}

/// An ordered, deduplicated set of query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct CanonicalQuery {
    params: Vec<(&'static str, String)>,
}

impl CanonicalQuery {
    fn from_unsorted(mut params: Vec<(&'static str, String)>) -> Self {
        params.sort_by(|a, b| a.0.cmp(b.0));
        Self { params }
    }

    /// Parameters in canonical order.
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The same query with `page` and `page_size` removed.
    pub fn without_pagination(&self) -> Self {
        Self {
            params: self
                .params
                .iter()
                .filter(|(k, _)| *k != keys::PAGE && *k != keys::PAGE_SIZE)
                .cloned()
                .collect(),
        }
    }

    /// URL-encoded `k=v&k=v` form.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }

    /// Whether no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl fmt::Display for CanonicalQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

fn date_params(range: &DateRange, params: &mut Vec<(&'static str, String)>) {
    if let Some(start) = range.start_instant() {
        params.push((keys::DATE_FROM, start.format(DATE_FORMAT).to_string()));
    }
    if let Some(end) = range.end_instant() {
        params.push((keys::DATE_TO, end.format(DATE_FORMAT).to_string()));
    }
}

fn criteria_params(criteria: &FilterCriteria) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(6);
    if let Some(action) = criteria.action.action() {
        params.push((keys::ACTION, action.as_str().to_string()));
    }
    if let Some(term) = criteria.search_term() {
        params.push((keys::SEARCH, term.to_string()));
    }
    date_params(&criteria.date_range, &mut params);
    params
}

/// Query for one listing page.
pub fn list_query(state: &FilterState) -> AppResult<CanonicalQuery> {
    state.validate()?;
    let mut params = criteria_params(&state.criteria);
    params.push((keys::PAGE, state.page.to_string()));
    params.push((keys::PAGE_SIZE, state.page_size.to_string()));
    Ok(CanonicalQuery::from_unsorted(params))
}

/// Query for a full, unpaginated export of the filtered set.
pub fn export_query(criteria: &FilterCriteria) -> AppResult<CanonicalQuery> {
    criteria.validate()?;
    Ok(CanonicalQuery::from_unsorted(criteria_params(criteria)))
}

/// Query for the per-day summary series; only the date bounds apply.
pub fn summary_query(range: &DateRange) -> AppResult<CanonicalQuery> {
    range.validate()?;
    let mut params = Vec::with_capacity(2);
    date_params(range, &mut params);
    Ok(CanonicalQuery::from_unsorted(params))
}
