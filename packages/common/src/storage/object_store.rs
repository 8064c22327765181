use async_trait::async_trait;
use futures::TryStreamExt;
use s3::creds::Credentials;
use s3::serde_types::HeadObjectResult;
use s3::{Bucket, Region};
use tokio_util::io::StreamReader;

use super::error::StorageError;
use super::path::encode_path;
use super::traits::{BoxReader, DiskDriver, StorageDisk};

/// Connection settings for an S3-compatible bucket.
#[derive(Debug, Clone)]
pub struct ObjectStoreOptions {
    pub bucket: String,
    pub region: String,
    pub endpoint: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub path_style: bool,
    /// Public base URL (bucket website, CDN) the disk advertises.
    pub url: Option<String>,
}

/// Storage disk backed by an S3-compatible object store.
pub struct ObjectStoreDisk {
    bucket: Box<Bucket>,
    url: Option<String>,
}

impl ObjectStoreDisk {
    pub fn new(options: ObjectStoreOptions) -> Result<Self, StorageError> {
        let credentials = Credentials::new(
            options.access_key.as_deref(),
            options.secret_key.as_deref(),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Backend(e.to_string()))?;

        let region = Region::Custom {
            region: options.region,
            endpoint: options.endpoint,
        };

        let mut bucket = Bucket::new(&options.bucket, region, credentials)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        if options.path_style {
            bucket = bucket.with_path_style();
        }

        let url = options
            .url
            .map(|u| u.trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty());

        Ok(Self { bucket, url })
    }

    /// HEAD the object, returning `None` when it does not exist.
    async fn head(&self, path: &str) -> Result<Option<HeadObjectResult>, StorageError> {
        let (head, status) = self
            .bucket
            .head_object(path)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        match status {
            200 => Ok(Some(head)),
            404 => Ok(None),
            other => Err(StorageError::Backend(format!(
                "HEAD {path} returned status {other}"
            ))),
        }
    }
}

/// Byte length from a HEAD response. A missing or negative length is an
/// error, never zero.
fn content_length(path: &str, length: Option<i64>) -> Result<u64, StorageError> {
    length
        .and_then(|len| u64::try_from(len).ok())
        .ok_or_else(|| StorageError::Backend(format!("HEAD {path} returned no content length")))
}

#[async_trait]
impl StorageDisk for ObjectStoreDisk {
    fn driver(&self) -> DiskDriver {
        DiskDriver::S3
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
        Ok(self.head(path).await?.is_some())
    }

    async fn read_stream(&self, path: &str) -> Result<BoxReader, StorageError> {
        let response = self
            .bucket
            .get_object_stream(path)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        if response.status_code == 404 {
            return Err(StorageError::NotFound(path.to_string()));
        }
        if response.status_code != 200 {
            return Err(StorageError::Backend(format!(
                "GET {path} returned status {}",
                response.status_code
            )));
        }

        let stream = response
            .bytes
            .map_err(|e| std::io::Error::other(e.to_string()));
        Ok(Box::new(StreamReader::new(stream)))
    }

    async fn mime_type(&self, path: &str) -> Result<Option<String>, StorageError> {
        let stored = self.head(path).await?.and_then(|h| h.content_type);
        Ok(stored.or_else(|| mime_guess::from_path(path).first().map(|m| m.to_string())))
    }

    async fn size(&self, path: &str) -> Result<u64, StorageError> {
        let head = self
            .head(path)
            .await?
            .ok_or_else(|| StorageError::NotFound(path.to_string()))?;
        content_length(path, head.content_length)
    }

    async fn put(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let content_type = mime_guess::from_path(path).first_or_octet_stream();
        let response = self
            .bucket
            .put_object_with_content_type(path, data, content_type.as_ref())
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        match response.status_code() {
            200..=299 => Ok(()),
            other => Err(StorageError::Backend(format!(
                "PUT {path} returned status {other}"
            ))),
        }
    }
}
