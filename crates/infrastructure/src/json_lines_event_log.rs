//! Append-only JSON-lines event log on local disk.
//!
//! Each record is stamped, serialized to a complete line and written while
//! holding the file mutex, so concurrent requests never interleave partial
//! lines and timestamps follow file order. A write that fails midway is
//! truncated away before the lock is released.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dochost_application::EventLogRepository;
use dochost_core::{AppError, AppResult};
use dochost_domain::EventRecord;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// File-backed event log writing one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesEventLog {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl JsonLinesEventLog {
    /// Opens (or creates) the log file in append mode, creating missing
    /// parent directories.
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|error| {
                AppError::Internal(format!(
                    "failed to create event log directory '{}': {error}",
                    parent.display()
                ))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to open event log '{}': {error}",
                    path.display()
                ))
            })?;

        info!(path = %path.display(), "event log opened");

        Ok(Self {
            path,
            file: Mutex::new(Some(file)),
        })
    }

    /// Location of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes and syncs the file, then refuses further appends.
    pub async fn close(&self) -> AppResult<()> {
        let mut guard = self.file.lock().await;
        let Some(mut file) = guard.take() else {
            return Ok(());
        };

        file.flush().await?;
        file.sync_all().await?;

        info!(path = %self.path.display(), "event log closed");
        Ok(())
    }
}

#[async_trait]
impl EventLogRepository for JsonLinesEventLog {
    async fn append(&self, mut record: EventRecord) -> AppResult<()> {
        let mut guard = self.file.lock().await;
        let file = guard
            .as_mut()
            .ok_or_else(|| AppError::Internal("event log is closed".to_owned()))?;

        record.stamp_now();
        let mut line = serde_json::to_string(&record).map_err(|error| {
            AppError::Internal(format!("failed to serialize event record: {error}"))
        })?;
        line.push('\n');

        write_line(file, line.as_bytes()).await?;

        debug!(event = record.kind.name(), "event record appended");
        Ok(())
    }
}

async fn write_line(file: &mut File, line: &[u8]) -> std::io::Result<()> {
    let length = file.metadata().await?.len();

    let written = async {
        file.write_all(line).await?;
        file.flush().await
    }
    .await;

    if written.is_err() {
        truncate_partial(file, length).await;
    }
    written
}

async fn truncate_partial(file: &File, length: u64) {
    if let Err(error) = file.set_len(length).await {
        warn!(%error, length, "failed to truncate partial event record");
    }
}
