//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod credential;
mod event;
mod filename;
mod submission;

pub use credential::Credential;
pub use event::{EventKind, EventRecord, RequestMetadata, UploadAttemptResult};
pub use filename::{FALLBACK_FILENAME, MAX_FILENAME_BYTES, SafeFilename};
pub use submission::SubmissionFields;
