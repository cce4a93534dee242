//! Backend API configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for the audit log HTTP backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the dashboard API (e.g. `https://app.example.com/api`).
    pub base_url: String,
    /// Bearer token attached to every request, if any.
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Path of the audit log collection relative to `base_url`.
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
}

fn default_timeout() -> u64 {
    30
}

fn default_logs_path() -> String {
    "/logs".to_string()
}
