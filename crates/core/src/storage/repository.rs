//! Key-value repository trait
//!
//! Defines the interface for durable storage over named keys.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::Result;

/// Well-known keys
pub mod keys {
    pub const AUTH_TOKEN: &str = "authToken";
    pub const AUTH_USER: &str = "authUser";
    pub const MOCK_TASKS: &str = "mockTasks";
    pub const DARK_MODE: &str = "darkMode";
}

/// Repository interface for plain string entries
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Read and decode a JSON entry.
///
/// A value that fails to decode is discarded from the store and reported as
/// absent, so callers fall back to their defaults.
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            debug!("Discarding malformed entry {}: {}", key, err);
            store.delete(key).await?;
            Ok(None)
        }
    }
}

/// Encode `value` as JSON and store it under `key`
pub async fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let encoded = serde_json::to_string(value)?;
    store.set(key, &encoded).await
}

/// Remove every key in `keys`, attempting all of them before reporting the
/// first failure
pub async fn delete_keys(store: &dyn KeyValueStore, keys: &[&str]) -> Result<()> {
    let mut first_err = None;
    for key in keys {
        if let Err(err) = store.delete(key).await {
            first_err.get_or_insert(err);
        }
    }
    match first_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
