//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod api;
pub mod listing;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::api::ApiConfig;
use self::listing::{ExportConfig, ListingConfig};
use self::logging::LoggingConfig;

use crate::error::AppError;
use crate::types::pagination::PageSize;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend API settings.
    pub api: ApiConfig,
    /// Listing defaults.
    #[serde(default)]
    pub listing: ListingConfig,
    /// Export download settings.
    #[serde(default)]
    pub export: ExportConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// Values from the file are overlaid with environment variables prefixed
    /// with `OUVIDORIA__` (e.g. `OUVIDORIA__API__BASE_URL`).
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("OUVIDORIA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        tracing::debug!(path, base_url = %config.api.base_url, "Configuration loaded");
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::configuration("api.base_url must not be empty"));
        }
        PageSize::try_from(self.listing.default_page_size).map_err(|_| {
            AppError::configuration(format!(
                "listing.default_page_size must be one of {:?}",
                PageSize::ALLOWED
            ))
        })?;
        Ok(())
    }
}
