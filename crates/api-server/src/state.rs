//! Application state

use std::sync::Arc;

use taskdeck_core::storage::KeyValueStore;

use crate::config::ApiConfig;
use crate::store::MockTaskStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    task_store: MockTaskStore,
}

impl AppState {
    /// Create a new AppState whose tasks live in `kv`
    pub async fn new(config: ApiConfig, kv: Arc<dyn KeyValueStore>) -> taskdeck_core::Result<Self> {
        let task_store = MockTaskStore::open(kv, &config.user.id).await?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, task_store }),
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get reference to the task store
    pub fn task_store(&self) -> &MockTaskStore {
        &self.inner.task_store
    }
}
