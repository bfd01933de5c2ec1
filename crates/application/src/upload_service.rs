use std::sync::Arc;

use dochost_core::{AppError, AppResult};
use dochost_domain::{EventKind, RequestMetadata, SafeFilename, UploadAttemptResult};
use sha2::{Digest, Sha256};
use tokio::runtime::Handle;
use tracing::warn;

use crate::{EventLogService, UploadStore, UploadWriter};

/// Outcome of a stored upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Sanitized name the file was stored under.
    pub filename: SafeFilename,
    /// Path of the stored file.
    pub saved_path: String,
    /// Lowercase hex SHA-256 of the stored bytes.
    pub sha256: String,
    /// Number of bytes stored.
    pub size_bytes: u64,
}

/// Application service for the upload endpoint.
#[derive(Clone)]
pub struct UploadService {
    store: Arc<dyn UploadStore>,
    event_log: EventLogService,
}

impl UploadService {
    /// Creates a service from a store and the shared event log.
    #[must_use]
    pub fn new(store: Arc<dyn UploadStore>, event_log: EventLogService) -> Self {
        Self { store, event_log }
    }

    /// Records an upload request that never reached the store.
    pub async fn reject(
        &self,
        metadata: &RequestMetadata,
        result: UploadAttemptResult,
    ) -> AppResult<()> {
        self.event_log
            .record(EventKind::UploadAttempt { result }, metadata)
            .await
    }

    /// Opens a session that streams one file into the store.
    ///
    /// The client filename is sanitized before it touches the store.
    pub async fn begin(
        &self,
        metadata: RequestMetadata,
        client_filename: &str,
    ) -> AppResult<UploadSession> {
        let filename = SafeFilename::sanitize(client_filename);

        let writer = match self.store.begin(&filename).await {
            Ok(writer) => writer,
            Err(error) => {
                self.event_log
                    .record_best_effort(
                        EventKind::UploadAttempt {
                            result: UploadAttemptResult::SaveFailed,
                        },
                        &metadata,
                    )
                    .await;
                return Err(error);
            }
        };

        Ok(UploadSession {
            writer: Some(writer),
            hasher: Sha256::new(),
            size_bytes: 0,
            filename,
            metadata,
            event_log: self.event_log.clone(),
        })
    }
}

/// A single file being streamed into the store.
///
/// Every session ends in exactly one of [`UploadSession::finish`] or
/// [`UploadSession::abort`], each of which appends one event record. A
/// session dropped before either (the client went away mid-body) drops its
/// writer, which discards the partial file, and records the attempt as
/// `incomplete` in the background.
pub struct UploadSession {
    writer: Option<Box<dyn UploadWriter>>,
    hasher: Sha256,
    size_bytes: u64,
    filename: SafeFilename,
    metadata: RequestMetadata,
    event_log: EventLogService,
}

impl UploadSession {
    /// Sanitized name the file will be stored under.
    #[must_use]
    pub fn filename(&self) -> &SafeFilename {
        &self.filename
    }

    /// Writes a chunk and feeds it to the running digest.
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> AppResult<()> {
        let writer = self.writer.as_mut().ok_or_else(closed_session)?;
        writer.write_chunk(chunk).await?;
        self.hasher.update(chunk);
        self.size_bytes += chunk.len() as u64;
        Ok(())
    }

    /// Publishes the file and appends its `file_upload` record.
    ///
    /// `content_length` is the length the client declared for the whole
    /// request and is logged as given.
    pub async fn finish(mut self, content_length: Option<u64>) -> AppResult<UploadReceipt> {
        let writer = self.writer.take().ok_or_else(closed_session)?;

        let saved_path = match writer.commit().await {
            Ok(saved_path) => saved_path,
            Err(error) => {
                self.event_log
                    .record_best_effort(
                        EventKind::UploadAttempt {
                            result: UploadAttemptResult::SaveFailed,
                        },
                        &self.metadata,
                    )
                    .await;
                return Err(error);
            }
        };

        let sha256 = hex::encode(std::mem::take(&mut self.hasher).finalize());

        self.event_log
            .record(
                EventKind::FileUpload {
                    filename: self.filename.as_str().to_owned(),
                    saved_path: saved_path.clone(),
                    sha256: sha256.clone(),
                    content_length,
                    size_bytes: self.size_bytes,
                },
                &self.metadata,
            )
            .await?;

        Ok(UploadReceipt {
            filename: self.filename.clone(),
            saved_path,
            sha256,
            size_bytes: self.size_bytes,
        })
    }

    /// Discards the partial file and records the failed attempt.
    ///
    /// Returns `error` unchanged.
    pub async fn abort(mut self, error: AppError) -> AppError {
        let result = attempt_result_for(&error);

        if let Some(writer) = self.writer.take()
            && let Err(cleanup_error) = writer.abort().await
        {
            warn!(
                filename = %self.filename,
                %cleanup_error,
                "failed to discard partial upload"
            );
        }

        self.event_log
            .record_best_effort(EventKind::UploadAttempt { result }, &self.metadata)
            .await;

        error
    }
}

impl Drop for UploadSession {
    fn drop(&mut self) {
        let Some(writer) = self.writer.take() else {
            return;
        };
        drop(writer);

        warn!(filename = %self.filename, "upload dropped before completion");

        let Ok(runtime) = Handle::try_current() else {
            return;
        };
        let event_log = self.event_log.clone();
        let metadata = std::mem::take(&mut self.metadata);
        runtime.spawn(async move {
            event_log
                .record_best_effort(
                    EventKind::UploadAttempt {
                        result: UploadAttemptResult::Incomplete,
                    },
                    &metadata,
                )
                .await;
        });
    }
}

fn closed_session() -> AppError {
    AppError::Internal("upload session already closed".to_owned())
}

fn attempt_result_for(error: &AppError) -> UploadAttemptResult {
    match error {
        AppError::Validation(_) => UploadAttemptResult::Incomplete,
        AppError::PayloadTooLarge(_) => UploadAttemptResult::TooLarge,
        AppError::Unauthorized(_) | AppError::Internal(_) => UploadAttemptResult::SaveFailed,
    }
}
