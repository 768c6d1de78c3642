//! Task list state and its fetch/create/update/delete lifecycle
//!
//! Nothing is applied optimistically: the list only changes once the API
//! has acknowledged a mutation. Loading is tracked per in-flight operation,
//! so one request settling does not hide another that is still running.
//! `error` is shared by all operations and reflects whichever settled last.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{debug, warn};

use taskdeck_core::task::{CreateTaskRequest, Task, UpdateTaskRequest};

use crate::api::ApiClient;
use crate::error::{ClientError, Result};

pub type OperationId = u64;

/// Snapshot handed to readers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TasksState {
    pub tasks: Vec<Task>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct TasksInner {
    tasks: Vec<Task>,
    pending: BTreeSet<OperationId>,
    error: Option<String>,
}

impl TasksInner {
    fn snapshot(&self) -> TasksState {
        TasksState {
            tasks: self.tasks.clone(),
            is_loading: !self.pending.is_empty(),
            error: self.error.clone(),
        }
    }
}

pub struct TasksController {
    api: ApiClient,
    state: RwLock<TasksInner>,
    next_op: AtomicU64,
    /// Serializes update/delete per task id
    task_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TasksController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: RwLock::new(TasksInner::default()),
            next_op: AtomicU64::new(1),
            task_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> TasksState {
        self.state.read().await.snapshot()
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.state.read().await.tasks.clone()
    }

    pub async fn is_loading(&self) -> bool {
        !self.state.read().await.pending.is_empty()
    }

    /// Operations dispatched but not yet settled
    pub async fn pending_operations(&self) -> Vec<OperationId> {
        self.state.read().await.pending.iter().copied().collect()
    }

    async fn begin(&self) -> OperationId {
        let op = self.next_op.fetch_add(1, Ordering::Relaxed);
        let mut state = self.state.write().await;
        state.pending.insert(op);
        state.error = None;
        op
    }

    /// Settle `op`: on success apply `commit` to the list, on failure record
    /// the message and leave the list alone
    async fn settle<T>(
        &self,
        op: OperationId,
        result: Result<T>,
        commit: impl FnOnce(&mut Vec<Task>, &T),
    ) -> Result<T> {
        let mut state = self.state.write().await;
        state.pending.remove(&op);
        match result {
            Ok(value) => {
                commit(&mut state.tasks, &value);
                state.error = None;
                Ok(value)
            }
            Err(err) => {
                state.error = Some(err.message().to_string());
                Err(err)
            }
        }
    }

    async fn lock_task(&self, id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.task_locks.lock().await;
            Arc::clone(locks.entry(id.to_string()).or_default())
        };
        lock.lock_owned().await
    }

    async fn release_task(&self, guard: OwnedMutexGuard<()>) {
        drop(guard);
        let mut locks = self.task_locks.lock().await;
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    /// Replace the whole list with the API's snapshot
    pub async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        let op = self.begin().await;
        let result = self.api.list_tasks().await;
        self.settle(op, result, |tasks, fetched: &Vec<Task>| {
            debug!("Fetched {} tasks", fetched.len());
            *tasks = fetched.clone();
        })
        .await
    }

    /// Create a task and append the API's copy
    pub async fn create_task(&self, data: CreateTaskRequest) -> Result<Task> {
        let op = self.begin().await;
        let result = self.api.create_task(&data).await;
        self.settle(op, result, |tasks, created: &Task| {
            tasks.push(created.clone());
        })
        .await
    }

    /// Apply a partial update and replace the matching entry.
    ///
    /// The list is untouched when the id is not held locally, or when the
    /// returned copy is not newer than the one already held.
    pub async fn update_task(&self, data: UpdateTaskRequest) -> Result<Task> {
        if data.id.is_empty() {
            let err = ClientError::validation("Task id is required");
            self.state.write().await.error = Some(err.message().to_string());
            return Err(err);
        }

        let guard = self.lock_task(&data.id).await;
        let op = self.begin().await;
        let result = self.api.update_task(&data).await;
        let settled = self
            .settle(op, result, |tasks, updated: &Task| {
                let Some(existing) = tasks.iter_mut().find(|t| t.id == updated.id) else {
                    debug!("Updated task {} is not in the local list", updated.id);
                    return;
                };
                if updated.updated_at <= existing.updated_at {
                    warn!("Ignoring stale update for task {}", updated.id);
                    return;
                }
                *existing = updated.clone();
            })
            .await;
        self.release_task(guard).await;
        settled
    }

    /// Delete a task and drop every local entry with its id
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        let guard = self.lock_task(id).await;
        let op = self.begin().await;
        let result = self.api.delete_task(id).await;
        let settled = self
            .settle(op, result, |tasks, _: &()| {
                tasks.retain(|t| t.id != id);
            })
            .await;
        self.release_task(guard).await;
        settled
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Forget all tasks, e.g. after logout
    pub async fn clear_tasks(&self) {
        let mut state = self.state.write().await;
        state.tasks.clear();
        state.error = None;
    }
}
