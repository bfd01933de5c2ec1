use std::sync::Arc;

use async_trait::async_trait;
use dochost_core::{AppError, AppResult};
use dochost_domain::EventRecord;
use tokio::sync::Mutex;

use crate::{EventLogRepository, EventLogService};

/// Event log that keeps appended records for assertions.
#[derive(Default)]
pub(crate) struct RecordingEventLog {
    records: Mutex<Vec<EventRecord>>,
}

impl RecordingEventLog {
    pub(crate) async fn records(&self) -> Vec<EventRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl EventLogRepository for RecordingEventLog {
    async fn append(&self, record: EventRecord) -> AppResult<()> {
        self.records.lock().await.push(record);
        Ok(())
    }
}

/// Event log whose appends always fail.
pub(crate) struct BrokenEventLog;

#[async_trait]
impl EventLogRepository for BrokenEventLog {
    async fn append(&self, _record: EventRecord) -> AppResult<()> {
        Err(AppError::Internal("event log unavailable".to_owned()))
    }
}

pub(crate) fn recording_service() -> (Arc<RecordingEventLog>, EventLogService) {
    let repository = Arc::new(RecordingEventLog::default());
    let service = EventLogService::new(repository.clone());
    (repository, service)
}
