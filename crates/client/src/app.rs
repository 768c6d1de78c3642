//! One client session: both controllers sharing a transport and a store.

use std::sync::Arc;

use taskdeck_core::storage::KeyValueStore;
use taskdeck_core::transport::Transport;

use crate::api::ApiClient;
use crate::auth::AuthController;
use crate::error::Result;
use crate::preferences::Preferences;
use crate::tasks::TasksController;

pub struct AppStore {
    store: Arc<dyn KeyValueStore>,
    auth: AuthController,
    tasks: TasksController,
}

impl AppStore {
    /// Wire the controllers to `transport`, restoring any persisted session
    /// from `store`
    pub async fn new(transport: Arc<dyn Transport>, store: Arc<dyn KeyValueStore>) -> Self {
        let api = ApiClient::new(transport, Arc::clone(&store));
        let auth = AuthController::restore(api.clone(), Arc::clone(&store)).await;
        let tasks = TasksController::new(api);

        Self { store, auth, tasks }
    }

    pub fn auth(&self) -> &AuthController {
        &self.auth
    }

    pub fn tasks(&self) -> &TasksController {
        &self.tasks
    }

    pub async fn preferences(&self) -> Preferences {
        Preferences::load(Arc::clone(&self.store)).await
    }

    /// Log out and forget the task list; the list is cleared even when the
    /// logout request fails
    pub async fn logout(&self) -> Result<()> {
        let result = self.auth.logout().await;
        self.tasks.clear_tasks().await;
        result
    }
}
