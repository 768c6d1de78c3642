//! File-based key-value storage implementation
//!
//! Stores all entries as one JSON object in a file on disk.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::warn;

use super::repository::KeyValueStore;
use crate::Result;

/// File-backed store using a JSON object of string entries
pub struct FileKvStore {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory cache of entries
    cache: RwLock<BTreeMap<String, String>>,
}

impl FileKvStore {
    /// Open a FileKvStore
    ///
    /// If the file doesn't exist, it will be created on first write. A file
    /// that cannot be parsed is treated as empty and overwritten on the
    /// next write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!("Ignoring malformed store file {}: {}", path.display(), err);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the given snapshot to disk
    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let cache = self.cache.read().await;
        Ok(cache.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut cache = self.cache.write().await;
        cache.insert(key.to_string(), value.to_string());
        self.persist(&cache).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut cache = self.cache.write().await;
        if cache.remove(key).is_some() {
            self.persist(&cache).await?;
        }
        Ok(())
    }
}
