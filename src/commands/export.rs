//! CSV export command.

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};
use ouvidoria_console::ExportOrchestrator;
use ouvidoria_core::error::AppError;

use super::FilterArgs;

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Filters; the same ones the listing would use
    #[command(flatten)]
    pub filter: FilterArgs,
    /// Directory to write the CSV into (overrides `export.directory`)
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

#[derive(Debug, Serialize)]
struct ExportReport {
    path: String,
    bytes_written: u64,
}

/// Execute the export command
pub async fn execute(
    args: &ExportArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let (client, mut view) = super::connect(&config)?;
    args.filter.apply(&mut view);

    let orchestrator = match &args.output_dir {
        Some(dir) => ExportOrchestrator::new(dir),
        None => ExportOrchestrator::from_config(&config.export),
    };
    let today = chrono::Local::now().date_naive();

    let result = view.export(&client, &orchestrator, today).await;
    let notices = view.notifications_mut().drain();

    let file = match result {
        Ok(file) => file,
        Err(e) => {
            notices.iter().for_each(output::print_notification);
            return Err(e);
        }
    };

    match format {
        OutputFormat::Json => output::print_json(&ExportReport {
            path: file.path.display().to_string(),
            bytes_written: file.bytes_written,
        }),
        OutputFormat::Table => {
            notices.iter().for_each(output::print_notification);
            output::print_kv("Directory", &orchestrator.directory().display().to_string());
            output::print_kv("Bytes written", &file.bytes_written.to_string());
        }
    }
    Ok(())
}
