use std::sync::Arc;

use tracing::{debug, instrument};

use super::prefix::{
    PUBLIC_PREFIXES, STORAGE_PREFIXES, is_absolute_url, normalize_reference, strip_prefixes,
};
use super::public::{BaseUrl, PublicRoot};
use crate::storage::{DiskDriver, StorageDisk, StorageError};

/// Turns stored asset references into canonical public URLs.
///
/// Candidates are checked in a fixed order: references that are already URLs,
/// files under the public web root, then the storage disk. A reference that
/// cannot be located resolves to the caller's fallback.
#[derive(Clone)]
pub struct AssetResolver {
    public: PublicRoot,
    base_url: BaseUrl,
    disk: Arc<dyn StorageDisk>,
}

impl AssetResolver {
    pub fn new(public: PublicRoot, base_url: BaseUrl, disk: Arc<dyn StorageDisk>) -> Self {
        Self {
            public,
            base_url,
            disk,
        }
    }

    pub fn public_root(&self) -> &PublicRoot {
        &self.public
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn disk(&self) -> &dyn StorageDisk {
        self.disk.as_ref()
    }

    /// Resolve `value` to an absolute URL, or return `fallback`.
    #[instrument(level = "debug", skip(self))]
    pub async fn resolve(&self, value: Option<&str>, fallback: Option<&str>) -> Option<String> {
        let fallback = || fallback.map(str::to_string);

        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return fallback();
        };

        if is_absolute_url(value) {
            return Some(value.to_string());
        }

        let trimmed = normalize_reference(value);

        let public_candidate = strip_prefixes(&trimmed, PUBLIC_PREFIXES);
        if !public_candidate.is_empty() && self.public.has_file(public_candidate).await {
            return Some(self.base_url.asset(public_candidate));
        }

        let storage_path = strip_prefixes(&trimmed, STORAGE_PREFIXES);
        if storage_path.is_empty() {
            return fallback();
        }

        let disk_url = self.disk_url(storage_path);

        // A local disk has nothing that can serve its files over HTTP, so the
        // proxy fronts it whatever its URL builder says.
        if self.disk.driver() == DiskDriver::Local && self.disk_has(storage_path).await {
            return Some(self.base_url.storage_proxy(storage_path));
        }

        if let Some(url) = disk_url {
            return Some(self.absolutize(url));
        }

        if self.disk_has(storage_path).await {
            return Some(self.base_url.storage_proxy(storage_path));
        }

        fallback()
    }

    /// The disk's URL for `storage_path` made absolute, or the proxy route
    /// when the disk cannot build one.
    pub fn public_disk_url(&self, storage_path: &str) -> String {
        match self.disk_url(storage_path) {
            Some(url) => self.absolutize(url),
            None => self.base_url.storage_proxy(storage_path),
        }
    }

    fn disk_url(&self, storage_path: &str) -> Option<String> {
        match self.disk.url(storage_path) {
            Ok(url) if !url.is_empty() => Some(url.replace('\\', "/")),
            Ok(_) => None,
            Err(StorageError::UrlUnavailable(_)) => None,
            Err(e) => {
                debug!(path = storage_path, error = %e, "disk URL lookup failed");
                None
            }
        }
    }

    fn absolutize(&self, url: String) -> String {
        if is_absolute_url(&url) {
            url
        } else {
            self.base_url.join_root_relative(&url)
        }
    }

    async fn disk_has(&self, storage_path: &str) -> bool {
        match self.disk.exists(storage_path).await {
            Ok(found) => found,
            Err(e) => {
                debug!(path = storage_path, error = %e, "disk existence check failed");
                false
            }
        }
    }
}
