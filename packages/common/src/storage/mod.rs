mod error;
mod path;
mod traits;

pub mod filesystem;
pub mod memory;
#[cfg(feature = "object-storage")]
pub mod object_store;

pub use error::StorageError;
pub use path::{encode_path, join_under_root};
pub use traits::{BoxReader, DiskDriver, SizedReader, StorageDisk};
