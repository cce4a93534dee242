//! Per-day audit summary series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregates for one calendar day, as computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// The day this bucket covers.
    pub date: NaiveDate,
    /// Number of actions recorded that day.
    pub total_actions: u64,
    /// Distinct users acting that day.
    pub unique_users: u64,
    /// Most frequent action that day; the backend sorts the series by it.
    #[serde(default)]
    pub most_common_action: Option<String>,
    /// Percentage (0-100) of successful actions that day.
    pub success_rate: f64,
}
