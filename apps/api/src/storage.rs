//! Document store: turns a resume's stored location into a readable local file.
//!
//! Local deployments keep uploads on disk under `UPLOAD_DIR`; S3/MinIO deployments
//! download the object into a temp file that lives as long as the `LocalDocument`.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("document not found at {0}")]
    Missing(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("S3 error: {0}")]
    S3(String),
}

/// A document materialized on the local filesystem.
#[derive(Debug)]
pub enum LocalDocument {
    Disk(PathBuf),
    /// Downloaded copy; removed when dropped.
    Temp(NamedTempFile),
}

impl LocalDocument {
    pub fn path(&self) -> &Path {
        match self {
            LocalDocument::Disk(path) => path,
            LocalDocument::Temp(file) => file.path(),
        }
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<LocalDocument, StorageError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Local filesystem
// ────────────────────────────────────────────────────────────────────────────

pub struct LocalDocumentStore {
    root: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute locations are used as-is; relative ones are resolved under the root.
    pub fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn fetch(&self, location: &str) -> Result<LocalDocument, StorageError> {
        let path = self.resolve(location);
        if !tokio::fs::try_exists(&path).await? {
            return Err(StorageError::Missing(path.display().to_string()));
        }
        Ok(LocalDocument::Disk(path))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// S3 / MinIO
// ────────────────────────────────────────────────────────────────────────────

pub struct S3DocumentStore {
    client: S3Client,
    bucket: String,
}

impl S3DocumentStore {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    async fn fetch(&self, location: &str) -> Result<LocalDocument, StorageError> {
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(location)
            .send()
            .await
            .map_err(|e| StorageError::S3(format!("get s3://{}/{location}: {e}", self.bucket)))?;

        let body = object
            .body
            .collect()
            .await
            .map_err(|e| StorageError::S3(format!("read s3://{}/{location}: {e}", self.bucket)))?
            .into_bytes();

        debug!("Downloaded s3://{}/{} ({} bytes)", self.bucket, location, body.len());
        Ok(LocalDocument::Temp(spill_to_temp(&body)?))
    }
}

fn spill_to_temp(bytes: &Bytes) -> Result<NamedTempFile, StorageError> {
    let mut file = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(".pdf")
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}
