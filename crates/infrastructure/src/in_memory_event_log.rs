use async_trait::async_trait;
use dochost_application::EventLogRepository;
use dochost_core::AppResult;
use dochost_domain::EventRecord;
use tokio::sync::RwLock;

/// In-memory event log implementation.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    records: RwLock<Vec<EventRecord>>,
}

impl InMemoryEventLog {
    /// Creates an empty in-memory log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Returns every record appended so far, oldest first.
    pub async fn records(&self) -> Vec<EventRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl EventLogRepository for InMemoryEventLog {
    async fn append(&self, mut record: EventRecord) -> AppResult<()> {
        let mut records = self.records.write().await;
        record.stamp_now();
        records.push(record);
        Ok(())
    }
}
