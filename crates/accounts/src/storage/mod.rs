//! Local key-value persistence.
//!
//! Values are JSON strings. [`get_item`] and [`set_item`] layer typed
//! `serde_json` access on top of any [`KeyValueStore`].
//!
//! # Backends
//!
//! - [`MemoryStore`] - In-process map with an optional byte quota
//! - [`FileStore`] - One `<key>.json` file per key in a data directory

pub mod file;
pub mod memory;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage keys used by the account store and the authentication gate.
pub mod keys {
    /// Key holding the JSON array of all accounts.
    pub const USERS: &str = "users";

    /// Key holding the account record of the logged-in session.
    pub const CURRENT_USER: &str = "currentUser";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the underlying medium failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A stored value could not be encoded or decoded.
    #[error("serialization error for key {key}: {source}")]
    Serialization {
        /// Key being accessed.
        key: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The write would exceed the backend's capacity.
    #[error("storage quota exceeded writing {key}: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Total bytes the store would hold after the write.
        needed: usize,
        /// Configured capacity in bytes.
        quota: usize,
    },

    /// The key cannot be represented by this backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Async key-value namespace holding JSON strings.
///
/// No method is atomic with respect to another; callers performing a
/// read-modify-write accept that a concurrent writer may be lost.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value at `key`, `None` if it was never set.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the raw value at `key`.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Delete every key.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Read and decode the JSON value at `key`.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the stored value does not decode
/// as `T`, or the backend's own error.
pub async fn get_item<T: DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.get(key).await? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Serialization {
            key: key.to_owned(),
            source,
        })
}

/// Encode `value` as JSON and store it at `key`.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if `value` cannot be encoded, or the
/// backend's own error.
pub async fn set_item<T: Serialize + ?Sized>(
    storage: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialization {
        key: key.to_owned(),
        source,
    })?;
    storage.set(key, raw).await
}
