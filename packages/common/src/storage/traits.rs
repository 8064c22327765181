use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// An open file together with its byte length.
pub struct SizedReader {
    pub reader: BoxReader,
    pub size: u64,
}

/// Identifies how a disk stores its files.
///
/// A `Local` disk cannot serve files over HTTP by itself, so anything on it
/// must be fronted by the storage proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiskDriver {
    Local,
    S3,
}

impl DiskDriver {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::S3 => "s3",
        }
    }
}

impl fmt::Display for DiskDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path-addressed file storage backend.
///
/// Paths are disk-relative and use `/` separators.
#[async_trait]
pub trait StorageDisk: Send + Sync {
    /// The driver backing this disk.
    fn driver(&self) -> DiskDriver;

    /// Build the disk's own public URL for a path.
    ///
    /// The result may be root-relative. Disks without a configured public
    /// location return [`StorageError::UrlUnavailable`].
    fn url(&self, path: &str) -> Result<String, StorageError>;

    /// Check whether a file exists at `path`.
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Open a file as a streaming async reader.
    async fn read_stream(&self, path: &str) -> Result<BoxReader, StorageError>;

    /// Read all bytes of a file.
    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.read_stream(path).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// MIME type of a file, if the disk can determine one.
    async fn mime_type(&self, path: &str) -> Result<Option<String>, StorageError> {
        Ok(mime_guess::from_path(path).first().map(|m| m.to_string()))
    }

    /// Size of a file in bytes.
    async fn size(&self, path: &str) -> Result<u64, StorageError>;

    /// Open a file and report its length.
    ///
    /// Disks that can size the opened handle override this so the length
    /// always matches the bytes the reader yields.
    async fn open_sized(&self, path: &str) -> Result<SizedReader, StorageError> {
        let reader = self.read_stream(path).await?;
        let size = self.size(path).await?;
        Ok(SizedReader { reader, size })
    }

    /// Store bytes at `path`, replacing any existing file.
    async fn put(&self, path: &str, data: &[u8]) -> Result<(), StorageError>;
}
