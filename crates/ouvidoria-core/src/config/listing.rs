//! Listing and export configuration.

use serde::{Deserialize, Serialize};

/// Defaults applied when a listing view is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Initial page size; must belong to the allowed set.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Quiet period after the last keystroke before a search is applied.
    #[serde(default = "default_debounce")]
    pub search_debounce_ms: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            search_debounce_ms: default_debounce(),
        }
    }
}

/// Where exported files are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Target directory for `audit-log-YYYY-MM-DD.csv` downloads.
    #[serde(default = "default_directory")]
    pub directory: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

fn default_page_size() -> u64 {
    25
}

fn default_debounce() -> u64 {
    500
}

fn default_directory() -> String {
    ".".to_string()
}
