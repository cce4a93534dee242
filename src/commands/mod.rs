//! CLI command definitions and dispatch.

pub mod actions;
pub mod browse;
pub mod config;
pub mod export;
pub mod list;
pub mod summary;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::output::{self, OutputFormat};
use ouvidoria_client::AuditLogClient;
use ouvidoria_console::{AuditLogView, FetchOutcome};
use ouvidoria_core::config::AppConfig;
use ouvidoria_core::error::AppError;
use ouvidoria_core::types::ActionFilter;

/// Ouvidoria audit log browser
#[derive(Debug, Parser)]
#[command(name = "ouvidoria-audit", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List one page of audit log entries
    List(list::ListArgs),
    /// Show the summary panel for a date range
    Summary(summary::SummaryArgs),
    /// Export the filtered audit log to CSV
    Export(export::ExportArgs),
    /// List the selectable action types
    Actions,
    /// Browse the audit log interactively
    Browse,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::List(args) => list::execute(args, &self.config, self.format).await,
            Commands::Summary(args) => summary::execute(args, &self.config, self.format).await,
            Commands::Export(args) => export::execute(args, &self.config, self.format).await,
            Commands::Actions => actions::execute(&self.config, self.format).await,
            Commands::Browse => browse::execute(&self.config).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Filter flags shared by the listing and export commands
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only entries with this action (e.g. `login`); `all` for no restriction
    #[arg(short, long)]
    pub action: Option<String>,
    /// First day included (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day included (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Free-text search
    #[arg(short, long)]
    pub search: Option<String>,
}

impl FilterArgs {
    /// Apply the flags to a fresh view.
    pub fn apply(&self, view: &mut AuditLogView) {
        if let Some(action) = &self.action {
            view.set_action(ActionFilter::parse(action));
        }
        view.set_date_range(self.from, self.to);
        if let Some(search) = &self.search {
            view.set_search(search.as_str());
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: build the HTTP client and a fresh view from configuration
pub fn connect(config: &AppConfig) -> Result<(AuditLogClient, AuditLogView), AppError> {
    let client = AuditLogClient::new(&config.api)?;
    let view = AuditLogView::from_config(&config.listing)?;
    Ok((client, view))
}

/// Turn a non-applied outcome into the error reported to the shell.
///
/// The notification text queued by the view is printed first.
pub fn outcome_to_result(view: &mut AuditLogView, outcome: FetchOutcome) -> Result<(), AppError> {
    match outcome {
        FetchOutcome::Applied | FetchOutcome::Relocated | FetchOutcome::Discarded => Ok(()),
        FetchOutcome::Failed(kind) => {
            let notices = view.notifications_mut().drain();
            for notice in &notices {
                output::print_notification(notice);
            }
            let message = notices
                .last()
                .map(|n| n.message.clone())
                .unwrap_or_else(|| "Request failed".to_string());
            Err(view
                .last_error()
                .cloned()
                .unwrap_or_else(|| AppError::new(kind, message)))
        }
    }
}

/// Map a terminal prompt failure into an internal error.
pub fn prompt_error(e: impl std::fmt::Display) -> AppError {
    AppError::internal(format!("Input error: {}", e))
}
