//! Upload store backed by a flat directory.
//!
//! Files are streamed into a hidden `.<random>.part` file next to their final
//! location and renamed into place on commit, so a partially written upload
//! is never visible under its real name. Sanitized names never start with a
//! dot, so temporary files cannot collide with stored ones. The temporary
//! file is removed when its writer is dropped without a commit.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dochost_application::{UploadStore, UploadWriter};
use dochost_core::{AppError, AppResult};
use dochost_domain::SafeFilename;
use tempfile::TempPath;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

/// Directory-backed upload store.
#[derive(Debug, Clone)]
pub struct FilesystemUploadStore {
    root: PathBuf,
}

impl FilesystemUploadStore {
    /// Opens the store, creating the directory if it does not exist.
    pub async fn open(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();

        tokio::fs::create_dir_all(&root).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to create upload directory '{}': {error}",
                root.display()
            ))
        })?;

        info!(root = %root.display(), "upload store opened");
        Ok(Self { root })
    }

    /// Directory holding stored files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl UploadStore for FilesystemUploadStore {
    async fn begin(&self, filename: &SafeFilename) -> AppResult<Box<dyn UploadWriter>> {
        let final_path = self.root.join(filename.as_str());

        let temp_file = tempfile::Builder::new()
            .prefix(".")
            .suffix(".part")
            .tempfile_in(&self.root)
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to create temporary upload file in '{}': {error}",
                    self.root.display()
                ))
            })?;
        let (file, temp_path) = temp_file.into_parts();

        debug!(
            temp = %temp_path.display(),
            destination = %final_path.display(),
            "upload started"
        );

        Ok(Box::new(FilesystemUploadWriter {
            writer: BufWriter::new(File::from_std(file)),
            temp_path,
            final_path,
        }))
    }
}

struct FilesystemUploadWriter {
    writer: BufWriter<File>,
    temp_path: TempPath,
    final_path: PathBuf,
}

#[async_trait]
impl UploadWriter for FilesystemUploadWriter {
    async fn write_chunk(&mut self, chunk: &[u8]) -> AppResult<()> {
        self.writer.write_all(chunk).await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> AppResult<String> {
        let Self {
            mut writer,
            temp_path,
            final_path,
        } = *self;

        let synced = async {
            writer.flush().await?;
            writer.get_mut().sync_all().await
        }
        .await;
        drop(writer);

        // Dropping `temp_path` on either error removes the partial file.
        synced
            .and_then(|()| temp_path.persist(&final_path).map_err(|error| error.error))
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to store upload '{}': {error}",
                    final_path.display()
                ))
            })?;

        Ok(final_path.display().to_string())
    }

    async fn abort(self: Box<Self>) -> AppResult<()> {
        let Self {
            writer, temp_path, ..
        } = *self;
        drop(writer);

        temp_path.close()?;
        Ok(())
    }
}
