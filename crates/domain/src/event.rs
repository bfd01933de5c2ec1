//! Event log records.
//!
//! Each handled request produces exactly one [`EventRecord`]. Records are
//! flat JSON objects: the `event` tag and the kind-specific fields, followed
//! by the caller's `ip`, `user_agent` and the UTC `timestamp`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller details captured from the inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    /// Client IP address, if known.
    pub ip: Option<String>,
    /// Client `User-Agent` header, if sent.
    pub user_agent: Option<String>,
}

/// Why an upload request did not produce a stored file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadAttemptResult {
    /// The request carried no `file` part with a filename.
    NoFile,
    /// The multipart stream ended or broke before the file completed.
    Incomplete,
    /// The request body exceeded the configured limit.
    TooLarge,
    /// Writing the file to the upload store failed.
    SaveFailed,
}

impl UploadAttemptResult {
    /// Stable label written to the log.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoFile => "no_file",
            Self::Incomplete => "incomplete",
            Self::TooLarge => "too_large",
            Self::SaveFailed => "save_failed",
        }
    }
}

/// Kind-specific payload of an event record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventKind {
    /// Upload request that did not store a file.
    UploadAttempt {
        /// Failure category.
        result: UploadAttemptResult,
    },
    /// File stored in the upload store.
    FileUpload {
        /// Sanitized filename used as the storage key.
        filename: String,
        /// Full path of the stored file.
        saved_path: String,
        /// Lowercase hex SHA-256 of the stored bytes.
        sha256: String,
        /// Declared request length, as sent by the client.
        content_length: Option<u64>,
        /// Bytes actually written.
        size_bytes: u64,
    },
    /// Form posted to the submit endpoint.
    FormSubmit {
        /// Submitted title.
        title: String,
        /// Submitted description.
        desc: String,
        /// Submitted tags.
        tags: String,
        /// Declared request length, as sent by the client.
        content_length: Option<u64>,
    },
    /// Credential check. The submitted password is never recorded.
    LoginAttempt {
        /// Submitted username.
        username: String,
        /// Whether both username and password matched.
        success: bool,
    },
}

impl EventKind {
    /// Returns the `event` tag for this kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::UploadAttempt { .. } => "upload_attempt",
            Self::FileUpload { .. } => "file_upload",
            Self::FormSubmit { .. } => "form_submit",
            Self::LoginAttempt { .. } => "login_attempt",
        }
    }
}

/// One immutable line of the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Kind tag and fields.
    #[serde(flatten)]
    pub kind: EventKind,
    /// Client IP address.
    pub ip: Option<String>,
    /// Client user agent.
    pub user_agent: Option<String>,
    /// Time the record was stored, UTC.
    #[serde(with = "utc_micros")]
    pub timestamp: DateTime<Utc>,
}

impl EventRecord {
    /// Builds a record stamped with the current time.
    #[must_use]
    pub fn new(kind: EventKind, metadata: &RequestMetadata) -> Self {
        Self::at(kind, metadata, Utc::now())
    }

    /// Builds a record with an explicit timestamp.
    #[must_use]
    pub fn at(kind: EventKind, metadata: &RequestMetadata, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind,
            ip: metadata.ip.clone(),
            user_agent: metadata.user_agent.clone(),
            timestamp,
        }
    }

    /// Moves the timestamp to the current time.
    ///
    /// Logs call this while holding their write lock so that timestamps
    /// follow the order records are stored in.
    pub fn stamp_now(&mut self) {
        self.timestamp = Utc::now();
    }
}

mod utc_micros {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
