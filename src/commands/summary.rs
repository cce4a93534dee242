//! Summary panel command.

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use ouvidoria_console::{AuditLogView, SummaryStats};
use ouvidoria_core::error::AppError;
use ouvidoria_core::types::DailySummary;

/// Arguments for the summary command
#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// First day included (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day included (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Also print one row per day
    #[arg(long)]
    pub daily: bool,
}

/// Per-day display row
#[derive(Debug, Serialize, Tabled)]
struct DayRow {
    /// Date
    date: String,
    /// Actions
    actions: u64,
    /// Users
    users: u64,
    /// Most common
    most_common: String,
    /// Success %
    success_rate: String,
}

impl From<&DailySummary> for DayRow {
    fn from(day: &DailySummary) -> Self {
        Self {
            date: day.date.to_string(),
            actions: day.total_actions,
            users: day.unique_users,
            most_common: day.most_common_action.clone().unwrap_or_default(),
            success_rate: format!("{:.1}", day.success_rate),
        }
    }
}

/// JSON form of the summary panel
#[derive(Debug, Serialize)]
struct SummaryReport<'a> {
    success_rate: Option<f64>,
    most_common_action: &'a str,
    total_actions: u64,
    days: &'a [DailySummary],
}

/// Execute the summary command
pub async fn execute(
    args: &SummaryArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let (client, mut view) = super::connect(&config)?;
    view.set_date_range(args.from, args.to);

    let outcome = view.load_summary(&client).await;
    super::outcome_to_result(&mut view, outcome)?;

    print_summary(&view, format, args.daily);
    Ok(())
}

/// Print the summary panel of a view
pub fn print_summary(view: &AuditLogView, format: OutputFormat, daily: bool) {
    let series = view.cache().summary().unwrap_or_default();
    let stats = SummaryStats::from_series(series);

    match format {
        OutputFormat::Json => output::print_json(&SummaryReport {
            success_rate: stats.success_rate.map(|r| r.as_f64()),
            most_common_action: &stats.most_common_action,
            total_actions: stats.total_actions,
            days: series,
        }),
        OutputFormat::Table => {
            if daily {
                let rows: Vec<DayRow> = series.iter().map(DayRow::from).collect();
                output::print_list(&rows, format, "No activity in this period.");
            }
            println!("Audit summary");
            let rate = match stats.success_rate {
                Some(rate) => format!("{}%", rate),
                None => stats.success_rate_label(),
            };
            output::print_kv("Success rate", &rate);
            output::print_kv("Most common action", &stats.most_common_action);
            output::print_kv("Total actions", &stats.total_actions.to_string());
            output::print_kv("Days", &stats.days.to_string());
        }
    }
}
