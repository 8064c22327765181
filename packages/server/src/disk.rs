use std::sync::Arc;

use common::storage::filesystem::LocalDisk;
use common::storage::object_store::{ObjectStoreDisk, ObjectStoreOptions};
use common::storage::{DiskDriver, StorageDisk, StorageError};
use tracing::info;

use crate::config::DiskConfig;

/// Open the storage disk described by `config`.
pub async fn open_disk(config: &DiskConfig) -> Result<Arc<dyn StorageDisk>, StorageError> {
    match config.driver {
        DiskDriver::Local => {
            let disk = LocalDisk::new(config.root.clone(), config.url.clone()).await?;
            info!(root = %config.root.display(), "Using local storage disk");
            Ok(Arc::new(disk))
        }
        DiskDriver::S3 => {
            let bucket = required(config.bucket.as_deref(), "storage.disk.bucket")?;
            let options = ObjectStoreOptions {
                bucket: bucket.to_string(),
                region: config
                    .region
                    .clone()
                    .unwrap_or_else(|| "us-east-1".to_string()),
                endpoint: required(config.endpoint.as_deref(), "storage.disk.endpoint")?
                    .to_string(),
                access_key: config.access_key.clone(),
                secret_key: config.secret_key.clone(),
                path_style: config.path_style,
                url: config.url.clone(),
            };
            let disk = ObjectStoreDisk::new(options)?;
            info!(bucket, "Using object storage disk");
            Ok(Arc::new(disk))
        }
    }
}

fn required<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str, StorageError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| StorageError::Backend(format!("{key} must be set for the s3 driver")))
}
