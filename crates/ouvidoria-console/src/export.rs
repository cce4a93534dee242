//! CSV export of the full filtered set.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use ouvidoria_core::config::listing::ExportConfig;
use ouvidoria_core::result::AppResult;
use ouvidoria_core::traits::{AuditLogSource, ChunkStream};
use ouvidoria_core::types::FilterCriteria;
use ouvidoria_core::types::query::{self, DATE_FORMAT};

/// Name of the downloaded file for `today`.
///
/// Exports on the same day share a name and overwrite each other.
pub fn export_filename(today: NaiveDate) -> String {
    format!("audit-log-{}.csv", today.format(DATE_FORMAT))
}

/// A completed export on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Where the CSV was written.
    pub path: PathBuf,
    /// Size of the file.
    pub bytes_written: u64,
    /// Name the backend suggested, for reference only.
    pub suggested_filename: Option<String>,
}

/// Re-runs the current filter against the export endpoint and saves the body.
#[derive(Debug, Clone)]
pub struct ExportOrchestrator {
    directory: PathBuf,
}

impl ExportOrchestrator {
    /// Save exports into `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Create from the export configuration section.
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(&config.directory)
    }

    /// Target directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Download the export for `criteria` into `audit-log-<today>.csv`.
    ///
    /// The body is streamed into a temporary sibling file that only replaces
    /// the target once the download completed, so a failed export never
    /// leaves a truncated CSV behind.
    pub async fn export<S>(
        &self,
        source: &S,
        criteria: &FilterCriteria,
        today: NaiveDate,
    ) -> AppResult<ExportedFile>
    where
        S: AuditLogSource + ?Sized,
    {
        let query = query::export_query(criteria)?;
        tracing::info!(query = %query, "Starting audit log export");

        let body = source.export(&query).await?;
        let suggested_filename = body.suggested_filename.clone();

        tokio::fs::create_dir_all(&self.directory).await?;
        let path = self.directory.join(export_filename(today));
        let partial = path.with_extension("csv.part");

        match save(&partial, &path, body.chunks).await {
            Ok(bytes_written) => {
                tracing::info!(path = %path.display(), bytes_written, "Audit log export saved");
                Ok(ExportedFile {
                    path,
                    bytes_written,
                    suggested_filename,
                })
            }
            Err(err) => {
                let _ = tokio::fs::remove_file(&partial).await;
                tracing::warn!(error = %err, "Audit log export failed");
                Err(err)
            }
        }
    }
}

/// Write the body to `partial` and move it onto `path`.
async fn save(partial: &Path, path: &Path, chunks: ChunkStream) -> AppResult<u64> {
    let written = write_stream(partial, chunks).await?;
    tokio::fs::rename(partial, path).await?;
    Ok(written)
}

async fn write_stream(path: &Path, mut chunks: ChunkStream) -> AppResult<u64> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written = 0u64;
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}
