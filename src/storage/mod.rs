//! Persistence backends for the cache layer.
//!
//! The cache layer talks to a key/string-value medium through the
//! [`StorageBackend`] trait; what it stores are the JSON envelopes produced
//! by [`CacheSlot`](crate::cache::CacheSlot). Two implementations ship:
//! a process-local [`MemoryStorage`] and a file-per-key [`FileStorage`].

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a persistence backend or from envelope encoding.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem-level failure in the backing medium.
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized into its envelope.
    #[error("envelope encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Convenient Result alias for backend operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A key/string-value persistence medium.
///
/// Every operation is a suspension point. Implementations serialize their
/// own reads and writes; callers perform no locking of their own.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Reads the raw value stored under `key`, `None` when absent.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any prior value.
    async fn set(&self, key: &str, value: String) -> StorageResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}
