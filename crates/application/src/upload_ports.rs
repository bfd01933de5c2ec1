use async_trait::async_trait;
use dochost_core::AppResult;
use dochost_domain::SafeFilename;

/// Storage port for uploaded files.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Starts writing a file that will be stored under `filename` once
    /// committed. Nothing is visible under that name before commit.
    async fn begin(&self, filename: &SafeFilename) -> AppResult<Box<dyn UploadWriter>>;
}

/// In-progress write of a single uploaded file.
#[async_trait]
pub trait UploadWriter: Send {
    /// Appends a chunk of file content.
    async fn write_chunk(&mut self, chunk: &[u8]) -> AppResult<()>;

    /// Publishes the file under its final name, replacing any previous file
    /// of that name, and returns the stored path. Cleans up after itself on
    /// failure.
    async fn commit(self: Box<Self>) -> AppResult<String>;

    /// Discards everything written so far.
    async fn abort(self: Box<Self>) -> AppResult<()>;
}
