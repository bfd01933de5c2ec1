use std::sync::Arc;

use async_trait::async_trait;
use dochost_core::AppResult;
use dochost_domain::{EventKind, EventRecord, RequestMetadata};
use tracing::warn;

/// Repository port for event log persistence.
#[async_trait]
pub trait EventLogRepository: Send + Sync {
    /// Appends one record.
    ///
    /// Implementations must never interleave two records, and re-stamp the
    /// record with [`EventRecord::stamp_now`] once it holds its place so the
    /// log reads in timestamp order.
    async fn append(&self, record: EventRecord) -> AppResult<()>;
}

/// Application service that stamps and appends event records.
#[derive(Clone)]
pub struct EventLogService {
    repository: Arc<dyn EventLogRepository>,
}

impl EventLogService {
    /// Creates a service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn EventLogRepository>) -> Self {
        Self { repository }
    }

    /// Appends a record for the given request, stamped with the current time.
    pub async fn record(&self, kind: EventKind, metadata: &RequestMetadata) -> AppResult<()> {
        self.repository
            .append(EventRecord::new(kind, metadata))
            .await
    }

    /// Appends a record on a path that is already failing; append errors
    /// are reported but not returned.
    pub async fn record_best_effort(&self, kind: EventKind, metadata: &RequestMetadata) {
        let event_name = kind.name();
        if let Err(error) = self.record(kind, metadata).await {
            warn!(event = event_name, %error, "failed to append event record");
        }
    }
}
