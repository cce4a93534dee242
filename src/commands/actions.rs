//! Action options command.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use ouvidoria_core::error::AppError;
use ouvidoria_core::types::ActionOption;

/// Action option display row
#[derive(Debug, Serialize, Tabled)]
struct ActionRow {
    /// Value
    value: String,
    /// Label
    label: String,
}

impl From<&ActionOption> for ActionRow {
    fn from(option: &ActionOption) -> Self {
        Self {
            value: option.value.clone(),
            label: option.label.clone(),
        }
    }
}

/// Execute the actions command
pub async fn execute(config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let (client, mut view) = super::connect(&config)?;

    let loaded = view
        .load_action_options(&client)
        .await
        .map(|options| options.iter().map(ActionRow::from).collect::<Vec<_>>());
    let rows = match loaded {
        Ok(rows) => rows,
        Err(e) => {
            view.notifications_mut()
                .drain()
                .iter()
                .for_each(output::print_notification);
            return Err(e);
        }
    };

    output::print_list(&rows, format, "No action types available.");
    Ok(())
}
