//! Task API endpoints
//!
//! Bearer-checked CRUD over the mock task list.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::{debug, warn};

use taskdeck_core::auth::MessageResponse;
use taskdeck_core::task::{CreateTaskRequest, Task, TaskPatch, TaskStatus};
use taskdeck_core::Error;

use super::{bad_request, internal_error, not_found, RouteError};
use crate::auth::authorize;
use crate::latency::Endpoint;
use crate::state::AppState;

// ============================================================================
// Request types
// ============================================================================

/// Create body with every field optional so a missing one is answered with
/// a `{message}` instead of a bare extractor rejection
#[derive(Debug, Deserialize)]
struct CreateTaskBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<TaskStatus>,
}

impl CreateTaskBody {
    fn validate(self) -> Result<CreateTaskRequest, RouteError> {
        match (self.title, self.description, self.status) {
            (Some(title), Some(description), Some(status)) if !title.trim().is_empty() => {
                Ok(CreateTaskRequest {
                    title,
                    description,
                    status,
                })
            }
            _ => Err(bad_request("Title, description and status are required")),
        }
    }
}

fn store_error(err: Error) -> RouteError {
    match err {
        Error::TaskNotFound(_) => not_found("Task not found"),
        other => internal_error(other),
    }
}

fn invalid_body(err: JsonRejection) -> RouteError {
    warn!("Rejecting task body: {}", err);
    bad_request("Invalid request body")
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/tasks - List all tasks
async fn list_tasks(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Task>>, RouteError> {
    authorize(&state, &headers)?;

    state.config().latency.wait(Endpoint::ListTasks).await;
    Ok(Json(state.task_store().list().await))
}

/// POST /api/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), RouteError> {
    authorize(&state, &headers)?;

    let Json(body) = body.map_err(invalid_body)?;
    let request = body.validate()?;

    let created = state
        .task_store()
        .create(request, &state.config().user.id)
        .await
        .map_err(store_error)?;
    debug!("Created task {}", created.id);

    state.config().latency.wait(Endpoint::CreateTask).await;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/tasks/{id} - Apply a partial update
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<Task>, RouteError> {
    authorize(&state, &headers)?;

    let Json(patch) = body.map_err(invalid_body)?;
    if matches!(&patch.title, Some(title) if title.trim().is_empty()) {
        return Err(bad_request("Title cannot be empty"));
    }

    let updated = state
        .task_store()
        .update(&id, &patch)
        .await
        .map_err(store_error)?;
    debug!("Updated task {}", updated.id);

    state.config().latency.wait(Endpoint::UpdateTask).await;
    Ok(Json(updated))
}

/// DELETE /api/tasks/{id} - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, RouteError> {
    authorize(&state, &headers)?;

    state.task_store().delete(&id).await.map_err(store_error)?;
    debug!("Deleted task {}", id);

    state.config().latency.wait(Endpoint::DeleteTask).await;
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}", put(update_task).delete(delete_task))
}
