use std::collections::HashMap;
use std::io::Cursor;
use std::sync::RwLock;

use async_trait::async_trait;

use super::error::StorageError;
use super::traits::{BoxReader, DiskDriver, StorageDisk};

/// How a [`MemoryDisk`] answers URL lookups.
#[derive(Debug, Clone)]
pub enum MemoryUrl {
    /// No URL of its own.
    Unavailable,
    /// `{base}/{path}`; `base` may be root-relative.
    Prefix(String),
    /// The URL builder fails outright.
    Broken,
}

/// In-memory storage disk.
///
/// Lets any driver and URL behaviour be simulated without a real backend.
pub struct MemoryDisk {
    driver: DiskDriver,
    url: MemoryUrl,
    files: RwLock<HashMap<String, Vec<u8>>>,
    unreadable: RwLock<Vec<String>>,
}

impl MemoryDisk {
    pub fn new(driver: DiskDriver, url: MemoryUrl) -> Self {
        Self {
            driver,
            url,
            files: RwLock::new(HashMap::new()),
            unreadable: RwLock::new(Vec::new()),
        }
    }

    /// Make `path` report as existing while refusing to open it.
    pub fn mark_unreadable(&self, path: &str) {
        if let Ok(mut unreadable) = self.unreadable.write() {
            unreadable.push(path.to_string());
        }
    }

    fn lock_error() -> StorageError {
        StorageError::Backend("memory disk lock poisoned".into())
    }
}

#[async_trait]
impl StorageDisk for MemoryDisk {
    fn driver(&self) -> DiskDriver {
        self.driver
    }

    fn url(&self, path: &str) -> Result<String, StorageError> {
        match &self.url {
            MemoryUrl::Unavailable => Err(StorageError::UrlUnavailable(path.to_string())),
            MemoryUrl::Prefix(base) => Ok(format!("{}/{path}", base.trim_end_matches('/'))),
            MemoryUrl::Broken => Err(StorageError::Backend("URL builder misconfigured".into())),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let files = self.files.read().map_err(|_| Self::lock_error())?;
        Ok(files.contains_key(path))
    }

    async fn read_stream(&self, path: &str) -> Result<BoxReader, StorageError> {
        let refused = self
            .unreadable
            .read()
            .map_err(|_| Self::lock_error())?
            .iter()
            .any(|p| p == path);
        if refused {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read refused",
            )));
        }

        let files = self.files.read().map_err(|_| Self::lock_error())?;
        let data = files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))?;
        Ok(Box::new(Cursor::new(data)))
    }

    async fn size(&self, path: &str) -> Result<u64, StorageError> {
        let files = self.files.read().map_err(|_| Self::lock_error())?;
        files
            .get(path)
            .map(|data| data.len() as u64)
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn put(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let mut files = self.files.write().map_err(|_| Self::lock_error())?;
        files.insert(path.to_string(), data.to_vec());
        Ok(())
    }
}
