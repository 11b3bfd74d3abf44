//! Key-value persistence port.
//!
//! Services persist their state as opaque byte blobs under well-known keys
//! (see [`byt_domain::constants`]). [`StoreExt`] layers JSON encoding on top
//! so callers deal in domain types.
//!
//! # Example
//!
//! ```no_run
//! use byt_core::ports::{KeyValueStore, StoreExt};
//! use byt_domain::FoaasOperation;
//!
//! async fn cached_ops(store: &dyn KeyValueStore) -> Vec<FoaasOperation> {
//!     store.load_json("com.byt.ops").await.ok().flatten().unwrap_or_default()
//! }
//! ```

use async_trait::async_trait;
use byt_domain::{BytError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Port for durable key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Bytes stored under `key`, or `None` when nothing was saved.
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace whatever is stored under `key`.
    async fn save(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// JSON helpers for any [`KeyValueStore`].
#[async_trait]
pub trait StoreExt: KeyValueStore {
    async fn load_json<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        match self.load(key).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| BytError::Serialization(format!("{key}: {e}"))),
            None => Ok(None),
        }
    }

    async fn save_json<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + Sync,
    {
        let bytes =
            serde_json::to_vec(value).map_err(|e| BytError::Serialization(format!("{key}: {e}")))?;
        self.save(key, bytes).await
    }
}

impl<S: KeyValueStore + ?Sized> StoreExt for S {}
