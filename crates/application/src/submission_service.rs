use dochost_core::AppResult;
use dochost_domain::{EventKind, RequestMetadata, SubmissionFields};

use crate::EventLogService;

/// Application service for the form submission endpoint.
#[derive(Clone)]
pub struct SubmissionService {
    event_log: EventLogService,
}

impl SubmissionService {
    /// Creates a service backed by the shared event log.
    #[must_use]
    pub fn new(event_log: EventLogService) -> Self {
        Self { event_log }
    }

    /// Records a form submission. Field values are logged verbatim.
    pub async fn submit(
        &self,
        metadata: &RequestMetadata,
        fields: SubmissionFields,
        content_length: Option<u64>,
    ) -> AppResult<()> {
        let SubmissionFields { title, desc, tags } = fields;

        self.event_log
            .record(
                EventKind::FormSubmit {
                    title,
                    desc,
                    tags,
                    content_length,
                },
                metadata,
            )
            .await
    }
}
