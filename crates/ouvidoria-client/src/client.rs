//! Audit log REST client.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_DISPOSITION};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use ouvidoria_core::config::api::ApiConfig;
use ouvidoria_core::error::{AppError, ErrorKind};
use ouvidoria_core::result::AppResult;
use ouvidoria_core::traits::{AuditLogSource, ExportBody};
use ouvidoria_core::types::{ActionOption, AuditLogEntry, CanonicalQuery, DailySummary, LogPage};

use crate::disposition;

/// Most characters of an error body echoed into an error message.
const MAX_ERROR_BODY: usize = 512;

/// Client for the `/logs` endpoints of the dashboard API.
#[derive(Debug, Clone)]
pub struct AuditLogClient {
    http: Client,
    logs_url: String,
    token: Option<String>,
}

impl AuditLogClient {
    /// Create a new client from the API configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to create HTTP client", e)
            })?;

        let logs_url = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            config.logs_path.trim_matches('/')
        );

        Ok(Self {
            http,
            logs_url,
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// Absolute URL of the log collection.
    pub fn logs_url(&self) -> &str {
        &self.logs_url
    }

    fn url(&self, suffix: &str, query: Option<&CanonicalQuery>) -> String {
        let mut url = format!("{}{}", self.logs_url, suffix);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(&query.to_query_string());
        }
        url
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.http.get(url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and turn transport failures and non-2xx statuses into errors.
    async fn send(&self, request: RequestBuilder, what: &str) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| transport_error(e, what))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let body: String = body.chars().take(MAX_ERROR_BODY).collect();
        tracing::warn!(status = status.as_u16(), what, "Audit log request failed");
        Err(AppError::from_status(
            status.as_u16(),
            format!("Failed to {what}: {status} - {body}"),
        ))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> AppResult<T> {
        tracing::debug!(url, "GET");
        let response = self.send(self.get(url), what).await?;
        response.json::<T>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Failed to parse response to {what}"),
                e,
            )
        })
    }
}

fn transport_error(err: reqwest::Error, what: &str) -> AppError {
    let detail = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "could not connect"
    } else {
        "request failed"
    };
    AppError::with_source(ErrorKind::Network, format!("Failed to {what}: {detail}"), err)
}

#[async_trait]
impl AuditLogSource for AuditLogClient {
    async fn list(&self, query: &CanonicalQuery) -> AppResult<LogPage<AuditLogEntry>> {
        let url = self.url("", Some(query));
        self.get_json(&url, "list audit logs").await
    }

    async fn summaries(&self, query: &CanonicalQuery) -> AppResult<Vec<DailySummary>> {
        let url = self.url("/summaries", Some(query));
        self.get_json(&url, "load audit summaries").await
    }

    async fn export(&self, query: &CanonicalQuery) -> AppResult<ExportBody> {
        let url = self.url("/export", Some(query));
        tracing::debug!(url, "GET (export)");
        let request = self.get(&url).header(ACCEPT, "text/csv");
        let response = self.send(request, "export audit logs").await?;

        let suggested_filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(disposition::filename);

        let chunks = response.bytes_stream().map(|chunk| {
            chunk.map_err(|e| {
                AppError::with_source(ErrorKind::Network, "Export download interrupted", e)
            })
        });

        Ok(ExportBody {
            suggested_filename,
            chunks: Box::pin(chunks),
        })
    }

    async fn action_options(&self) -> AppResult<Vec<ActionOption>> {
        let url = self.url("/action-options", None);
        self.get_json(&url, "load action options").await
    }
}
