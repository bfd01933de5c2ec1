use std::sync::Arc;

use dochost_application::{
    EventLogRepository, EventLogService, LoginService, SubmissionService, UploadService,
    UploadStore,
};
use dochost_domain::Credential;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub upload_service: UploadService,
    pub submission_service: SubmissionService,
    pub login_service: LoginService,
    pub trust_forwarded_for: bool,
}

impl AppState {
    /// Wires the services onto one event log and upload store.
    pub fn new(
        credential: Credential,
        event_log_repository: Arc<dyn EventLogRepository>,
        upload_store: Arc<dyn UploadStore>,
        trust_forwarded_for: bool,
    ) -> Self {
        let event_log = EventLogService::new(event_log_repository);

        Self {
            upload_service: UploadService::new(upload_store, event_log.clone()),
            submission_service: SubmissionService::new(event_log.clone()),
            login_service: LoginService::new(credential, event_log),
            trust_forwarded_for,
        }
    }
}
