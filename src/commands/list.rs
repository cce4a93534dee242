//! Audit log listing command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use ouvidoria_console::presenter::EMPTY_STATE_MESSAGE;
use ouvidoria_console::{AuditLogView, PageChange};
use ouvidoria_core::error::AppError;
use ouvidoria_core::types::{AuditLogEntry, PageSize};

use super::FilterArgs;

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filters
    #[command(flatten)]
    pub filter: FilterArgs,
    /// Page to show (1-based)
    #[arg(short, long, default_value = "1")]
    pub page: u64,
    /// Entries per page: 10, 25, 50 or 100
    #[arg(long)]
    pub page_size: Option<u64>,
}

/// Audit entry display row
#[derive(Debug, Serialize, Tabled)]
pub struct EntryRow {
    /// Time
    pub time: String,
    /// User
    pub user: String,
    /// Action
    pub action: String,
    /// Resource
    pub resource: String,
    /// Status
    pub status: String,
    /// IP
    pub ip: String,
}

impl From<&AuditLogEntry> for EntryRow {
    fn from(entry: &AuditLogEntry) -> Self {
        Self {
            time: entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            user: match &entry.actor {
                Some(actor) if !entry.is_system() => actor.label(),
                _ => "system".to_string(),
            },
            action: entry.action.to_string(),
            resource: entry.resource_label().unwrap_or_default(),
            status: entry.status.to_string(),
            ip: entry.ip_address.clone().unwrap_or_default(),
        }
    }
}

/// Execute the list command
pub async fn execute(
    args: &ListArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let (client, mut view) = super::connect(&config)?;

    if let Some(size) = args.page_size {
        view.set_page_size(PageSize::try_from(size)?);
    }
    args.filter.apply(&mut view);

    let outcome = view.refresh(&client).await;
    super::outcome_to_result(&mut view, outcome)?;

    // the page count is only known after the first fetch
    if args.page > 1 {
        match view.go_to_page(args.page) {
            PageChange::Moved(_) => {
                let outcome = view.refresh(&client).await;
                super::outcome_to_result(&mut view, outcome)?;
            }
            PageChange::Reset | PageChange::Unchanged => output::print_warning(&format!(
                "Page {} is out of range; showing page 1",
                args.page
            )),
        }
    }

    print_page(&view, format);
    Ok(())
}

/// Print the current page with its pagination footer
pub fn print_page(view: &AuditLogView, format: OutputFormat) {
    let Some(page) = view.page() else {
        return;
    };
    match format {
        OutputFormat::Json => output::print_json(page),
        OutputFormat::Table => {
            let rows: Vec<EntryRow> = page.items.iter().map(EntryRow::from).collect();
            output::print_list(&rows, format, EMPTY_STATE_MESSAGE);
            println!(
                "Page {} of {} ({} entries, {} per page)",
                page.page, page.total_pages, page.total_count, page.page_size
            );
        }
    }
}
