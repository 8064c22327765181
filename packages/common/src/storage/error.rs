use thiserror::Error;

/// Errors that can occur during storage disk operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested file was not found on the disk.
    #[error("file not found: {0}")]
    NotFound(String),

    /// An I/O error occurred.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The disk cannot build a public URL for the path.
    #[error("no public URL available for {0}")]
    UrlUnavailable(String),

    /// The path is not a valid disk-relative path.
    #[error("invalid storage path: {0}")]
    InvalidPath(String),

    /// The remote backend reported a failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}
