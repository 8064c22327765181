use std::path::{Path, PathBuf};

use url::Url;

use crate::storage::{encode_path, join_under_root};

/// Route prefix the storage proxy is mounted under.
pub const STORAGE_ROUTE_PREFIX: &str = "storage";

/// The application's absolute base URL, used to build every public URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Parse and validate an absolute base URL. Trailing slashes are dropped.
    pub fn parse(value: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(value)?;
        if parsed.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }
        Ok(Self(value.trim_end_matches('/').to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL of a file under the public web root.
    pub fn asset(&self, relative: &str) -> String {
        format!("{}/{}", self.0, encode_path(relative.trim_start_matches('/')))
    }

    /// URL of the storage proxy route for a disk-relative path.
    pub fn storage_proxy(&self, storage_path: &str) -> String {
        format!(
            "{}/{STORAGE_ROUTE_PREFIX}/{}",
            self.0,
            encode_path(storage_path.trim_start_matches('/'))
        )
    }

    /// Resolve a root-relative URL fragment against this base.
    ///
    /// The fragment is taken as already URL-encoded.
    pub fn join_root_relative(&self, fragment: &str) -> String {
        format!("{}/{}", self.0, fragment.trim_start_matches('/'))
    }
}

/// The directory the web server serves directly, without the proxy.
#[derive(Debug, Clone)]
pub struct PublicRoot {
    root: PathBuf,
}

impl PublicRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Whether a regular file exists at `relative` under the root.
    ///
    /// Paths that would leave the root never exist.
    pub async fn has_file(&self, relative: &str) -> bool {
        let Ok(full) = join_under_root(&self.root, relative) else {
            return false;
        };
        tokio::fs::metadata(&full)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }
}
