//! Typed calls against the task API
//!
//! Each call attaches the bearer token currently persisted under
//! `authToken` and turns any failure into a [`ClientError`] whose message
//! is the API's `message` field or a per-operation fallback.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::warn;

use taskdeck_core::auth::{AuthResponse, LoginCredentials};
use taskdeck_core::storage::{keys, KeyValueStore};
use taskdeck_core::task::{CreateTaskRequest, Task, UpdateTaskRequest};
use taskdeck_core::transport::{ApiRequest, ApiResponse, Transport};

use crate::error::{ClientError, Result};

pub const LOGIN_FAILED: &str = "Login failed";
pub const LOGOUT_FAILED: &str = "Logout failed";
pub const FETCH_TASKS_FAILED: &str = "Failed to fetch tasks";
pub const CREATE_TASK_FAILED: &str = "Failed to create task";
pub const UPDATE_TASK_FAILED: &str = "Failed to update task";
pub const DELETE_TASK_FAILED: &str = "Failed to delete task";

fn task_path(id: &str) -> String {
    format!("/api/tasks/{}", urlencoding::encode(id))
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    store: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { transport, store }
    }

    /// Token persisted by the last successful login, if any
    async fn bearer(&self) -> Option<String> {
        match self.store.get(keys::AUTH_TOKEN).await {
            Ok(token) => token,
            Err(err) => {
                warn!("Failed to read auth token: {}", err);
                None
            }
        }
    }

    async fn execute(&self, request: ApiRequest, fallback: &str) -> Result<ApiResponse> {
        let response = self.transport.send(request).await.map_err(|err| {
            warn!("{}: {}", fallback, err);
            ClientError::network(fallback)
        })?;

        if response.is_success() {
            Ok(response)
        } else {
            Err(ClientError::from_response(&response, fallback))
        }
    }

    fn decode<T: DeserializeOwned>(response: &ApiResponse, fallback: &str) -> Result<T> {
        response.json().map_err(|err| {
            warn!("{}: malformed response body: {}", fallback, err);
            ClientError::network(fallback)
        })
    }

    fn build(request: taskdeck_core::Result<ApiRequest>, fallback: &str) -> Result<ApiRequest> {
        request.map_err(|err| {
            warn!("{}: failed to encode request: {}", fallback, err);
            ClientError::validation(fallback)
        })
    }

    /// POST /api/login
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        let request = Self::build(ApiRequest::post("/api/login").with_json(credentials), LOGIN_FAILED)?;
        let response = self.execute(request, LOGIN_FAILED).await?;
        Self::decode(&response, LOGIN_FAILED)
    }

    /// POST /api/logout
    pub async fn logout(&self) -> Result<()> {
        self.execute(ApiRequest::post("/api/logout"), LOGOUT_FAILED)
            .await
            .map(|_| ())
    }

    /// GET /api/tasks
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let request = ApiRequest::get("/api/tasks").with_bearer(self.bearer().await);
        let response = self.execute(request, FETCH_TASKS_FAILED).await?;
        Self::decode(&response, FETCH_TASKS_FAILED)
    }

    /// POST /api/tasks
    pub async fn create_task(&self, data: &CreateTaskRequest) -> Result<Task> {
        let request = Self::build(ApiRequest::post("/api/tasks").with_json(data), CREATE_TASK_FAILED)?
            .with_bearer(self.bearer().await);
        let response = self.execute(request, CREATE_TASK_FAILED).await?;
        Self::decode(&response, CREATE_TASK_FAILED)
    }

    /// PUT /api/tasks/{id} with only the supplied fields
    pub async fn update_task(&self, data: &UpdateTaskRequest) -> Result<Task> {
        let request = Self::build(
            ApiRequest::put(task_path(&data.id)).with_json(&data.patch),
            UPDATE_TASK_FAILED,
        )?
        .with_bearer(self.bearer().await);
        let response = self.execute(request, UPDATE_TASK_FAILED).await?;
        Self::decode(&response, UPDATE_TASK_FAILED)
    }

    /// DELETE /api/tasks/{id}
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        let request = ApiRequest::delete(task_path(id)).with_bearer(self.bearer().await);
        self.execute(request, DELETE_TASK_FAILED).await.map(|_| ())
    }
}
