//! Application services and ports.

#![forbid(unsafe_code)]

mod event_log_service;
mod login_service;
mod submission_service;
mod upload_ports;
mod upload_service;

#[cfg(test)]
mod test_support;

pub use event_log_service::{EventLogRepository, EventLogService};
pub use login_service::{LoginOutcome, LoginService};
pub use submission_service::SubmissionService;
pub use upload_ports::{UploadStore, UploadWriter};
pub use upload_service::{UploadReceipt, UploadService, UploadSession};
