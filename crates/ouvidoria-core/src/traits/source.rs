//! Data source trait for audit log reads.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;
use crate::types::{ActionOption, AuditLogEntry, CanonicalQuery, DailySummary, LogPage};

/// Body chunks of a streamed download.
pub type ChunkStream = Pin<Box<dyn Stream<Item = AppResult<Bytes>> + Send>>;

/// A CSV export body, delivered in chunks as it arrives.
pub struct ExportBody {
    /// Filename the backend suggested via `Content-Disposition`, if any.
    pub suggested_filename: Option<String>,
    /// Body chunks.
    pub chunks: ChunkStream,
}

impl std::fmt::Debug for ExportBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportBody")
            .field("suggested_filename", &self.suggested_filename)
            .finish_non_exhaustive()
    }
}

/// Read-only access to the audit log backend.
///
/// Every method issues exactly one request and never retries; failures come
/// back as a typed [`AppError`](crate::error::AppError).
#[async_trait]
pub trait AuditLogSource: Send + Sync {
    /// Fetch one listing page for a query built by [`list_query`](crate::types::query::list_query).
    async fn list(&self, query: &CanonicalQuery) -> AppResult<LogPage<AuditLogEntry>>;

    /// Fetch the per-day summary series for a date-only query.
    async fn summaries(&self, query: &CanonicalQuery) -> AppResult<Vec<DailySummary>>;

    /// Open an unpaginated CSV export for a query built by
    /// [`export_query`](crate::types::query::export_query).
    async fn export(&self, query: &CanonicalQuery) -> AppResult<ExportBody>;

    /// Fetch the options offered by the action filter.
    async fn action_options(&self) -> AppResult<Vec<ActionOption>>;
}
