//! Persisted UI preferences

use std::sync::Arc;

use tracing::warn;

use taskdeck_core::storage::{keys, load_json, save_json, KeyValueStore};

use crate::error::{ClientError, Result};

pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
    dark_mode: bool,
}

impl Preferences {
    /// Read saved preferences; unreadable values fall back to defaults
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let dark_mode = match load_json::<bool>(store.as_ref(), keys::DARK_MODE).await {
            Ok(value) => value.unwrap_or(false),
            Err(err) => {
                warn!("Failed to read dark mode preference: {}", err);
                false
            }
        };
        Self { store, dark_mode }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub async fn set_dark_mode(&mut self, enabled: bool) -> Result<()> {
        self.dark_mode = enabled;
        save_json(self.store.as_ref(), keys::DARK_MODE, &enabled)
            .await
            .map_err(|err| ClientError::storage(format!("Failed to save preference: {}", err)))
    }

    /// Flip dark mode and return the new value
    pub async fn toggle_dark_mode(&mut self) -> Result<bool> {
        let enabled = !self.dark_mode;
        self.set_dark_mode(enabled).await?;
        Ok(enabled)
    }
}
