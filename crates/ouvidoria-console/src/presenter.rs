//! Result cache and display-only derivations.

use std::fmt;

use ouvidoria_core::error::{AppError, ErrorKind};
use ouvidoria_core::types::{AuditLogEntry, DailySummary, PageResult};

use crate::notification::Severity;

/// Shown in place of the table when nothing matches.
pub const EMPTY_STATE_MESSAGE: &str = "No audit log entries match the current filters.";

/// Placeholder for statistics that cannot be derived.
pub const NOT_AVAILABLE: &str = "N/A";

/// Wording for HTTP 403.
pub const ACCESS_DENIED_MESSAGE: &str =
    "Access denied. You do not have permission to view the audit log.";

/// Fixed-point scale applied to each `success_rate` before averaging.
const RATE_SCALE: i64 = 10_000;

/// Text, severity and retry affordance chosen for a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    /// Severity.
    pub severity: Severity,
    /// User-facing text.
    pub message: String,
    /// Whether a retry control is offered.
    pub retry: bool,
}

/// User-facing notice for a failed listing or summary fetch.
pub fn listing_failure(err: &AppError) -> FailureNotice {
    let (message, retry) = match err.kind {
        ErrorKind::Authorization => (ACCESS_DENIED_MESSAGE.to_string(), false),
        ErrorKind::Authentication => (
            "Your session has expired. Sign in again to view the audit log.".to_string(),
            false,
        ),
        ErrorKind::Network => (
            "Could not reach the server. Check your connection and try again.".to_string(),
            true,
        ),
        ErrorKind::Server => (
            "The server could not load the audit log. Please try again.".to_string(),
            true,
        ),
        ErrorKind::Validation => (format!("Invalid filter: {}", err.message), false),
        _ => ("Failed to load the audit log.".to_string(), true),
    };
    FailureNotice {
        severity: Severity::Error,
        message,
        retry,
    }
}

/// User-facing notice for a failed export; worded apart from listing failures.
pub fn export_failure(err: &AppError) -> FailureNotice {
    let message = match err.kind {
        ErrorKind::Authorization => {
            "Export failed: you do not have permission to export the audit log.".to_string()
        }
        ErrorKind::Validation => format!("Export failed: invalid filter: {}", err.message),
        ErrorKind::Storage => format!("Export failed: could not save the file: {}", err.message),
        ErrorKind::Network => {
            "Export failed: the download was interrupted or the server is unreachable.".to_string()
        }
        _ => "Export failed. Please try again.".to_string(),
    };
    FailureNotice {
        severity: Severity::Error,
        message,
        retry: err.kind != ErrorKind::Authorization && err.kind != ErrorKind::Validation,
    }
}

/// A percentage held in tenths, rounded half-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SuccessRate {
    tenths: i64,
}

impl SuccessRate {
    /// The value as a float with one decimal.
    pub fn as_f64(self) -> f64 {
        self.tenths as f64 / 10.0
    }

    /// The value in tenths of a percent.
    pub fn tenths(self) -> i64 {
        self.tenths
    }
}

impl fmt::Display for SuccessRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.tenths < 0 { "-" } else { "" };
        let abs = self.tenths.abs();
        write!(f, "{sign}{}.{}", abs / 10, abs % 10)
    }
}

/// Unweighted mean of the per-day success rates, rounded half-up to one
/// decimal. Every day counts the same regardless of its volume.
///
/// Rates are fixed to four decimals before averaging so that e.g.
/// `(95.2 + 98.1) / 2` yields `96.7` and not a float artefact of `96.6`.
pub fn aggregate_success_rate(series: &[DailySummary]) -> Option<SuccessRate> {
    if series.is_empty() {
        return None;
    }
    let sum: i64 = series
        .iter()
        .map(|day| (day.success_rate * RATE_SCALE as f64).round() as i64)
        .sum();
    let divisor = series.len() as i64 * (RATE_SCALE / 10);
    let tenths = (2 * sum + divisor).div_euclid(2 * divisor);
    Some(SuccessRate { tenths })
}

/// The action reported for the first bucket; the backend orders the series.
pub fn most_common_action(series: &[DailySummary]) -> String {
    series
        .first()
        .and_then(|day| day.most_common_action.clone())
        .filter(|action| !action.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Summary panel figures.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    /// Mean of daily success rates.
    pub success_rate: Option<SuccessRate>,
    /// Most common action, or `N/A`.
    pub most_common_action: String,
    /// Sum of actions over all buckets.
    pub total_actions: u64,
    /// Number of day buckets.
    pub days: usize,
}

impl SummaryStats {
    /// Derive the panel from a summary series.
    pub fn from_series(series: &[DailySummary]) -> Self {
        Self {
            success_rate: aggregate_success_rate(series),
            most_common_action: most_common_action(series),
            total_actions: series.iter().map(|d| d.total_actions).sum(),
            days: series.len(),
        }
    }

    /// Success rate text, `N/A` when there is no data.
    pub fn success_rate_label(&self) -> String {
        self.success_rate
            .map(|rate| rate.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

/// Latest successfully fetched listing page and summary series.
///
/// Each store is a full replacement of what was there before.
#[derive(Debug, Default)]
pub struct ResultCache {
    page: Option<PageResult<AuditLogEntry>>,
    summary: Option<Vec<DailySummary>>,
}

impl ResultCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listing page.
    pub fn store_page(&mut self, page: PageResult<AuditLogEntry>) {
        self.page = Some(page);
    }

    /// Replace the summary series.
    pub fn store_summary(&mut self, series: Vec<DailySummary>) {
        self.summary = Some(series);
    }

    /// The current page, if any fetch succeeded.
    pub fn page(&self) -> Option<&PageResult<AuditLogEntry>> {
        self.page.as_ref()
    }

    /// The current summary series.
    pub fn summary(&self) -> Option<&[DailySummary]> {
        self.summary.as_deref()
    }

    /// Derived summary figures.
    pub fn summary_stats(&self) -> Option<SummaryStats> {
        self.summary.as_deref().map(SummaryStats::from_series)
    }

    /// Message for the empty state, when the current page has no entries.
    pub fn empty_state(&self) -> Option<&'static str> {
        self.page
            .as_ref()
            .filter(|page| page.is_empty())
            .map(|_| EMPTY_STATE_MESSAGE)
    }
}
