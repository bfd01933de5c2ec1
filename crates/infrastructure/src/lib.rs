//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod filesystem_upload_store;
mod in_memory_event_log;
mod json_lines_event_log;

pub use filesystem_upload_store::FilesystemUploadStore;
pub use in_memory_event_log::InMemoryEventLog;
pub use json_lines_event_log::JsonLinesEventLog;
