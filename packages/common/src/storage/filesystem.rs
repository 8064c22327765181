use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::BufReader;

use super::error::StorageError;
use super::path::{encode_path, join_under_root};
use super::traits::{BoxReader, DiskDriver, SizedReader, StorageDisk};

/// Directory under the root that holds in-flight writes.
const TEMP_DIR: &str = ".tmp";

/// Filesystem-backed storage disk.
///
/// Files live at `{root}/{path}`. Writes go through `{root}/.tmp` and are
/// renamed into place; nothing under `.tmp` is addressable as a file.
pub struct LocalDisk {
    root: PathBuf,
    url: Option<String>,
}

impl LocalDisk {
    /// Create a new local disk, creating `root` if needed.
    ///
    /// `url` is the public base the disk advertises for its files; an empty
    /// or missing value means the disk has no URL of its own.
    pub async fn new(root: PathBuf, url: Option<String>) -> Result<Self, StorageError> {
        fs::create_dir_all(&root).await?;
        let url = url
            .map(|u| u.trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty());
        Ok(Self { root, url })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        let file_path = join_under_root(&self.root, path)?;
        if file_path.starts_with(self.temp_dir()) {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(file_path)
    }

    fn temp_dir(&self) -> PathBuf {
        self.root.join(TEMP_DIR)
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.temp_dir().join(uuid::Uuid::new_v4().to_string())
    }

    async fn open_file(&self, path: &str) -> Result<fs::File, StorageError> {
        let file_path = self.file_path(path)?;
        match fs::File::open(&file_path).await {
            Ok(file) => Ok(file),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl StorageDisk for LocalDisk {
    fn driver(&self) -> DiskDriver {
        DiskDriver::Local
    }

    fn url(&self, path: &str) -> Result<String, StorageError> {
        match &self.url {
            Some(base) => Ok(format!(
                "{base}/{}",
                encode_path(path.trim_start_matches('/'))
            )),
            None => Err(StorageError::UrlUnavailable(path.to_string())),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let file_path = self.file_path(path)?;
        match fs::metadata(&file_path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn read_stream(&self, path: &str) -> Result<BoxReader, StorageError> {
        let file = self.open_file(path).await?;
        Ok(Box::new(BufReader::new(file)))
    }

    async fn size(&self, path: &str) -> Result<u64, StorageError> {
        let file_path = self.file_path(path)?;
        match fs::metadata(&file_path).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn open_sized(&self, path: &str) -> Result<SizedReader, StorageError> {
        let file = self.open_file(path).await?;
        // Sized from the handle, not the path, so a concurrent replace
        // cannot change the length under an open reader.
        let size = file.metadata().await?.len();
        Ok(SizedReader {
            reader: Box::new(BufReader::new(file)),
            size,
        })
    }

    async fn put(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let file_path = self.file_path(path)?;
        let temp_path = self.temp_path();

        fs::create_dir_all(self.temp_dir()).await?;
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        if let Err(e) = fs::rename(&temp_path, &file_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }
}
