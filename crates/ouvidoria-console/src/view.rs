//! Audit log view controller.
//!
//! Owns the filter criteria, the pagination cursor, the request sequencers,
//! the result cache and the notification queue for one view instance.
//! Nothing here outlives the instance.
//!
//! Fetches are split into [`AuditLogView::begin_fetch`] and
//! [`AuditLogView::complete_fetch`] so that callers driving several requests
//! at once get last-request-wins semantics; [`AuditLogView::refresh`] runs
//! both halves for the common sequential case.

use chrono::NaiveDate;

use ouvidoria_core::config::listing::ListingConfig;
use ouvidoria_core::error::{AppError, ErrorKind};
use ouvidoria_core::result::AppResult;
use ouvidoria_core::traits::AuditLogSource;
use ouvidoria_core::types::query::{self, CanonicalQuery};
use ouvidoria_core::types::{
    ActionFilter, ActionOption, AuditLogEntry, DailySummary, DateRange, FilterCriteria,
    FilterState, LogPage, PageResult, PageSize,
};

use crate::export::{ExportOrchestrator, ExportedFile};
use crate::notification::{NotificationCenter, Severity};
use crate::pagination::{PageChange, Pagination};
use crate::presenter::{self, ResultCache, SummaryStats};
use crate::sequencer::{RequestSeq, RequestSequencer};

/// A dispatched listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Sequence number deciding whether the response may be applied.
    pub seq: RequestSeq,
    /// Exact parameters sent.
    pub query: CanonicalQuery,
    /// Page the request was made for.
    pub page: u64,
    /// Page size the request was made for.
    pub page_size: PageSize,
}

/// A dispatched summary request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTicket {
    /// Sequence number deciding whether the response may be applied.
    pub seq: RequestSeq,
    /// Exact parameters sent.
    pub query: CanonicalQuery,
}

/// What happened to a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the visible state.
    Applied,
    /// The result set shrank below the cursor; the cursor is back on page 1
    /// and a new fetch is needed.
    Relocated,
    /// A newer response had already been applied; nothing changed.
    Discarded,
    /// The request failed or was rejected before dispatch.
    Failed(ErrorKind),
}

/// State of one audit log view.
#[derive(Debug)]
pub struct AuditLogView {
    criteria: FilterCriteria,
    pagination: Pagination,
    list_seq: RequestSequencer,
    summary_seq: RequestSequencer,
    cache: ResultCache,
    action_options: Vec<ActionOption>,
    notifications: NotificationCenter,
    last_error: Option<AppError>,
}

impl AuditLogView {
    /// Create a view on page 1 with default filters.
    pub fn new(page_size: PageSize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            pagination: Pagination::new(page_size),
            list_seq: RequestSequencer::new(),
            summary_seq: RequestSequencer::new(),
            cache: ResultCache::new(),
            action_options: Vec::new(),
            notifications: NotificationCenter::default(),
            last_error: None,
        }
    }

    /// Create a view using the configured default page size.
    pub fn from_config(config: &ListingConfig) -> AppResult<Self> {
        Ok(Self::new(PageSize::try_from(config.default_page_size)?))
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Current filter criteria.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Pagination cursor.
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Snapshot of the full filter state.
    pub fn filter_state(&self) -> FilterState {
        FilterState {
            criteria: self.criteria.clone(),
            page: self.pagination.page(),
            page_size: self.pagination.page_size(),
        }
    }

    /// Last applied listing page.
    pub fn page(&self) -> Option<&PageResult<AuditLogEntry>> {
        self.cache.page()
    }

    /// Result cache.
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Summary figures for the last applied summary series.
    pub fn summary_stats(&self) -> Option<SummaryStats> {
        self.cache.summary_stats()
    }

    /// Options for the action filter, once loaded.
    pub fn action_options(&self) -> &[ActionOption] {
        &self.action_options
    }

    /// Whether the newest listing request is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.list_seq.is_pending()
    }

    /// Error of the last applied listing response, if it failed.
    pub fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }

    /// Whether a retry control belongs next to the current error.
    pub fn can_retry(&self) -> bool {
        self.last_error
            .as_ref()
            .is_some_and(|e| presenter::listing_failure(e).retry)
    }

    /// Notification queue.
    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Mutable notification queue, for dismissing.
    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    // ── Filter transitions ──────────────────────────────────────

    fn filter_changed(&mut self) -> bool {
        self.pagination.apply_new_filter();
        true
    }

    /// Select an action filter. Returns `true` if the criteria changed.
    pub fn set_action(&mut self, action: ActionFilter) -> bool {
        if self.criteria.action == action {
            return false;
        }
        self.criteria.action = action;
        self.filter_changed()
    }

    /// Set the date bounds. Returns `true` if the criteria changed.
    ///
    /// Inverted ranges are accepted here and rejected when a fetch is begun.
    pub fn set_date_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
        let range = DateRange::new(from, to);
        if self.criteria.date_range == range {
            return false;
        }
        self.criteria.date_range = range;
        self.filter_changed()
    }

    /// Set the (already debounced) search text. Returns `true` if the criteria changed.
    pub fn set_search(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.criteria.search == text {
            return false;
        }
        self.criteria.search = text;
        self.filter_changed()
    }

    /// Restore every filter to its default. Returns `true` if anything changed.
    pub fn clear_filters(&mut self) -> bool {
        if self.criteria == FilterCriteria::default() {
            return false;
        }
        self.criteria = FilterCriteria::default();
        self.filter_changed()
    }

    /// Change the page size; the cursor returns to page 1.
    pub fn set_page_size(&mut self, page_size: PageSize) -> bool {
        let changed = self.pagination.page_size() != page_size || self.pagination.page() != 1;
        self.pagination.set_page_size(page_size);
        changed
    }

    /// Jump to page `p`, or back to page 1 if `p` is out of range.
    pub fn go_to_page(&mut self, p: u64) -> PageChange {
        self.pagination.go_to_page(p)
    }

    /// Next page, if any.
    pub fn next_page(&mut self) -> PageChange {
        self.pagination.next()
    }

    /// Previous page, if any.
    pub fn previous_page(&mut self) -> PageChange {
        self.pagination.previous()
    }

    // ── Listing ─────────────────────────────────────────────────

    /// Build the query for the current state and tag a new request.
    ///
    /// A malformed filter is reported as a notification and no request is issued.
    pub fn begin_fetch(&mut self) -> AppResult<FetchTicket> {
        let state = self.filter_state();
        let query = match query::list_query(&state) {
            Ok(query) => query,
            Err(err) => {
                self.notify_failure(&err);
                return Err(err);
            }
        };
        let seq = self.list_seq.issue();
        tracing::debug!(%seq, query = %query, "Dispatching audit log fetch");
        Ok(FetchTicket {
            seq,
            query,
            page: state.page,
            page_size: state.page_size,
        })
    }

    /// Apply a listing response if no newer one has been applied.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: AppResult<LogPage<AuditLogEntry>>,
    ) -> FetchOutcome {
        if !self.list_seq.resolve(ticket.seq) {
            tracing::debug!(seq = %ticket.seq, "Discarding stale audit log response");
            return FetchOutcome::Discarded;
        }

        match result {
            Ok(page) => {
                self.last_error = None;
                let total_count = page.total_count;
                // an older response must not move a cursor the user has since changed
                if self.list_seq.is_latest(ticket.seq)
                    && ticket.page_size == self.pagination.page_size()
                    && self.pagination.sync_total(total_count)
                {
                    // the page points past the end; keep showing the last good one
                    tracing::debug!(total_count, "Result set shrank below cursor");
                    return FetchOutcome::Relocated;
                }
                self.cache.store_page(PageResult::new(
                    page.items,
                    ticket.page,
                    ticket.page_size,
                    total_count,
                ));
                FetchOutcome::Applied
            }
            Err(err) => {
                let kind = err.kind;
                tracing::warn!(seq = %ticket.seq, error = %err, "Audit log fetch failed");
                self.notify_failure(&err);
                self.last_error = Some(err);
                FetchOutcome::Failed(kind)
            }
        }
    }

    /// Fetch the current page and apply it.
    ///
    /// When the backend reports fewer pages than the cursor points at, the
    /// cursor moves to page 1 and the page is fetched once more.
    pub async fn refresh<S>(&mut self, source: &S) -> FetchOutcome
    where
        S: AuditLogSource + ?Sized,
    {
        let mut outcome = self.fetch_once(source).await;
        if outcome == FetchOutcome::Relocated {
            outcome = self.fetch_once(source).await;
        }
        outcome
    }

    async fn fetch_once<S>(&mut self, source: &S) -> FetchOutcome
    where
        S: AuditLogSource + ?Sized,
    {
        let ticket = match self.begin_fetch() {
            Ok(ticket) => ticket,
            Err(err) => return FetchOutcome::Failed(err.kind),
        };
        let result = source.list(&ticket.query).await;
        self.complete_fetch(ticket, result)
    }

    // ── Summary ─────────────────────────────────────────────────

    /// Build the summary query for the current date range and tag a new request.
    pub fn begin_summary(&mut self) -> AppResult<SummaryTicket> {
        let query = match query::summary_query(&self.criteria.date_range) {
            Ok(query) => query,
            Err(err) => {
                self.notify_failure(&err);
                return Err(err);
            }
        };
        Ok(SummaryTicket {
            seq: self.summary_seq.issue(),
            query,
        })
    }

    /// Apply a summary response if no newer one has been applied.
    pub fn complete_summary(
        &mut self,
        ticket: SummaryTicket,
        result: AppResult<Vec<DailySummary>>,
    ) -> FetchOutcome {
        if !self.summary_seq.resolve(ticket.seq) {
            tracing::debug!(seq = %ticket.seq, "Discarding stale summary response");
            return FetchOutcome::Discarded;
        }
        match result {
            Ok(series) => {
                self.cache.store_summary(series);
                FetchOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(error = %err, "Audit summary fetch failed");
                self.notify_failure(&err);
                FetchOutcome::Failed(err.kind)
            }
        }
    }

    /// Fetch and apply the summary series for the current date range.
    pub async fn load_summary<S>(&mut self, source: &S) -> FetchOutcome
    where
        S: AuditLogSource + ?Sized,
    {
        let ticket = match self.begin_summary() {
            Ok(ticket) => ticket,
            Err(err) => return FetchOutcome::Failed(err.kind),
        };
        let result = source.summaries(&ticket.query).await;
        self.complete_summary(ticket, result)
    }

    /// Load the action filter options.
    pub async fn load_action_options<S>(&mut self, source: &S) -> AppResult<&[ActionOption]>
    where
        S: AuditLogSource + ?Sized,
    {
        match source.action_options().await {
            Ok(options) => {
                self.action_options = options;
                Ok(&self.action_options)
            }
            Err(err) => {
                self.notify_failure(&err);
                Err(err)
            }
        }
    }

    // ── Export ──────────────────────────────────────────────────

    /// Export query for the current criteria; identical to the listing query
    /// without `page` and `page_size`.
    pub fn export_query(&self) -> AppResult<CanonicalQuery> {
        query::export_query(&self.criteria)
    }

    /// Export the current filtered set to `audit-log-<today>.csv`.
    ///
    /// The outcome is returned to the caller and also queued as a
    /// notification; the listing state is left untouched either way.
    pub async fn export<S>(
        &mut self,
        source: &S,
        orchestrator: &ExportOrchestrator,
        today: NaiveDate,
    ) -> AppResult<ExportedFile>
    where
        S: AuditLogSource + ?Sized,
    {
        match orchestrator.export(source, &self.criteria, today).await {
            Ok(file) => {
                self.notifications.push(
                    Severity::Success,
                    format!("Exported audit log to {}", file.path.display()),
                    false,
                );
                Ok(file)
            }
            Err(err) => {
                let notice = presenter::export_failure(&err);
                self.notifications
                    .push(notice.severity, notice.message, notice.retry);
                Err(err)
            }
        }
    }

    fn notify_failure(&mut self, err: &AppError) {
        let notice = presenter::listing_failure(err);
        self.notifications
            .push(notice.severity, notice.message, notice.retry);
    }
}

impl Default for AuditLogView {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{ACCESS_DENIED_MESSAGE, EMPTY_STATE_MESSAGE};
    use ouvidoria_core::types::{AuditAction, AuditStatus, EntryId};
    use std::collections::BTreeMap;

    fn entry(id: i64) -> AuditLogEntry {
        AuditLogEntry {
            id: EntryId::Int(id),
            action: AuditAction::View,
            actor: None,
            timestamp: "2024-01-03T10:15:00Z".parse().unwrap(),
            ip_address: None,
            resource_type: None,
            resource_id: None,
            status: AuditStatus::Success,
            metadata: BTreeMap::new(),
        }
    }

    fn page_of(ids: &[i64], total_count: u64) -> AppResult<LogPage<AuditLogEntry>> {
        Ok(LogPage {
            items: ids.iter().copied().map(entry).collect(),
            total_count,
        })
    }

    fn ids(view: &AuditLogView) -> Vec<EntryId> {
        view.page()
            .map(|p| p.items.iter().map(|e| e.id.clone()).collect())
            .unwrap_or_default()
    }

    fn date(s: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    }

    #[test]
    fn test_slow_stale_response_does_not_overwrite() {
        let mut view = AuditLogView::default();
        let t1 = view.begin_fetch().unwrap();
        view.set_action(ActionFilter::Only(AuditAction::Login));
        let t2 = view.begin_fetch().unwrap();
        assert!(view.is_loading());

        assert_eq!(view.complete_fetch(t2, page_of(&[2], 1)), FetchOutcome::Applied);
        assert!(!view.is_loading());
        assert_eq!(view.complete_fetch(t1, page_of(&[1], 1)), FetchOutcome::Discarded);
        assert_eq!(ids(&view), vec![EntryId::Int(2)]);
        assert!(!view.is_loading());
    }

    #[test]
    fn test_stale_error_does_not_surface() {
        let mut view = AuditLogView::default();
        let t1 = view.begin_fetch().unwrap();
        let t2 = view.begin_fetch().unwrap();
        view.complete_fetch(t2, page_of(&[2], 1));
        let outcome = view.complete_fetch(t1, Err(AppError::server("late failure")));
        assert_eq!(outcome, FetchOutcome::Discarded);
        assert!(view.last_error().is_none());
        assert!(view.notifications().is_empty());
    }

    #[test]
    fn test_early_response_shows_while_newer_pending() {
        let mut view = AuditLogView::default();
        let t1 = view.begin_fetch().unwrap();
        let t2 = view.begin_fetch().unwrap();
        assert_eq!(view.complete_fetch(t1, page_of(&[1], 1)), FetchOutcome::Applied);
        assert!(view.is_loading());
        assert_eq!(view.complete_fetch(t2, page_of(&[2], 1)), FetchOutcome::Applied);
        assert_eq!(ids(&view), vec![EntryId::Int(2)]);
        assert!(!view.is_loading());
    }

    #[test]
    fn test_empty_result() {
        let mut view = AuditLogView::default();
        let ticket = view.begin_fetch().unwrap();
        assert_eq!(
            view.complete_fetch(ticket, page_of(&[], 0)),
            FetchOutcome::Applied
        );
        let page = view.page().unwrap();
        assert_eq!(page.total_pages, 1);
        assert_eq!(view.cache().empty_state(), Some(EMPTY_STATE_MESSAGE));
        assert!(view.last_error().is_none());
        assert!(view.notifications().is_empty());
    }

    #[test]
    fn test_forbidden_clears_loading_without_retry() {
        let mut view = AuditLogView::default();
        let ticket = view.begin_fetch().unwrap();
        let outcome = view.complete_fetch(ticket, Err(AppError::authorization("403")));
        assert_eq!(outcome, FetchOutcome::Failed(ErrorKind::Authorization));
        assert!(!view.is_loading());
        assert!(!view.can_retry());
        let notice = view.notifications().latest().unwrap();
        assert_eq!(notice.message, ACCESS_DENIED_MESSAGE);
        assert!(!notice.retry);
    }

    #[test]
    fn test_failure_keeps_previous_page() {
        let mut view = AuditLogView::default();
        let t1 = view.begin_fetch().unwrap();
        view.complete_fetch(t1, page_of(&[1], 1));
        let t2 = view.begin_fetch().unwrap();
        view.complete_fetch(t2, Err(AppError::server("500")));
        assert_eq!(ids(&view), vec![EntryId::Int(1)]);
        assert!(view.can_retry());
    }

    #[test]
    fn test_inverted_range_is_never_dispatched() {
        let mut view = AuditLogView::default();
        view.set_date_range(date("2024-02-01"), date("2024-01-01"));
        let err = view.begin_fetch().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(!view.is_loading());
        assert_eq!(view.notifications().len(), 1);
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut view = AuditLogView::new(PageSize::try_from(10).unwrap());
        let ticket = view.begin_fetch().unwrap();
        view.complete_fetch(ticket, page_of(&[1], 95));
        assert_eq!(view.pagination().total_pages(), 10);

        view.go_to_page(4);
        assert!(view.set_search("maria"));
        assert_eq!(view.pagination().page(), 1);

        view.go_to_page(4);
        assert!(view.set_action(ActionFilter::Only(AuditAction::Delete)));
        assert_eq!(view.pagination().page(), 1);

        view.go_to_page(4);
        assert!(view.set_date_range(date("2024-01-01"), None));
        assert_eq!(view.pagination().page(), 1);

        view.go_to_page(4);
        assert!(!view.set_search("maria"));
        assert_eq!(view.pagination().page(), 4);

        view.set_page_size(PageSize::try_from(50).unwrap());
        assert_eq!(view.pagination().page(), 1);
    }

    #[test]
    fn test_shrunk_result_relocates_cursor() {
        let mut view = AuditLogView::new(PageSize::try_from(10).unwrap());
        let ticket = view.begin_fetch().unwrap();
        view.complete_fetch(ticket, page_of(&[1], 50));
        view.go_to_page(5);

        let ticket = view.begin_fetch().unwrap();
        assert_eq!(ticket.page, 5);
        assert_eq!(
            view.complete_fetch(ticket, page_of(&[], 12)),
            FetchOutcome::Relocated
        );
        assert_eq!(view.pagination().page(), 1);
        assert_eq!(view.pagination().total_pages(), 2);
    }

    #[test]
    fn test_failed_refetch_after_relocation_keeps_consistent_page() {
        let mut view = AuditLogView::new(PageSize::try_from(10).unwrap());
        let ticket = view.begin_fetch().unwrap();
        view.complete_fetch(ticket, page_of(&[1], 50));
        view.go_to_page(5);

        let ticket = view.begin_fetch().unwrap();
        assert_eq!(
            view.complete_fetch(ticket, page_of(&[], 12)),
            FetchOutcome::Relocated
        );
        let ticket = view.begin_fetch().unwrap();
        assert_eq!(ticket.page, 1);
        let outcome = view.complete_fetch(ticket, Err(AppError::server("500")));
        assert_eq!(outcome, FetchOutcome::Failed(ErrorKind::Server));

        let shown = view.page().unwrap();
        assert_eq!(shown.page, view.pagination().page());
        assert!(!shown.has_previous());
        assert_eq!(ids(&view), vec![EntryId::Int(1)]);
        assert!(view.can_retry());
        assert!(!view.is_loading());
    }

    #[test]
    fn test_summary_race_and_stats() {
        let mut view = AuditLogView::default();
        let s1 = view.begin_summary().unwrap();
        let s2 = view.begin_summary().unwrap();
        let day = |rate: f64| DailySummary {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            total_actions: 10,
            unique_users: 2,
            most_common_action: Some("login".to_string()),
            success_rate: rate,
        };
        view.complete_summary(s2, Ok(vec![day(95.2), day(98.1)]));
        assert_eq!(
            view.complete_summary(s1, Ok(vec![day(10.0)])),
            FetchOutcome::Discarded
        );
        let stats = view.summary_stats().unwrap();
        assert_eq!(stats.success_rate_label(), "96.7");
        assert_eq!(stats.most_common_action, "login");
    }
}
