//! Task list backing the mock API
//!
//! The list is held in memory and written through to the `mockTasks` key of
//! the injected key-value store after every mutation.

use std::sync::Arc;

use rand::Rng;
use tokio::sync::RwLock;
use tracing::{debug, info};

use taskdeck_core::storage::{keys, load_json, save_json, KeyValueStore};
use taskdeck_core::task::{CreateTaskRequest, Task, TaskPatch, TaskStatus};
use taskdeck_core::{Error, Result};

const ID_LENGTH: usize = 9;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Tasks every fresh store starts with
pub fn seed_tasks(user_id: &str) -> Vec<Task> {
    vec![
        Task::new(
            "1",
            user_id,
            "Welcome to the Task Manager",
            "This is your first task. You can edit or delete it!",
        ),
        Task::new(
            "2",
            user_id,
            "Complete the onboarding",
            "Learn how to use all the features of this task management application.",
        )
        .with_status(TaskStatus::InProgress),
    ]
}

/// Random short id, base36
pub fn generate_task_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

pub struct MockTaskStore {
    kv: Arc<dyn KeyValueStore>,
    tasks: RwLock<Vec<Task>>,
}

impl MockTaskStore {
    /// Load the persisted list, falling back to the seed tasks when the key
    /// is missing or malformed
    pub async fn open(kv: Arc<dyn KeyValueStore>, user_id: &str) -> Result<Self> {
        let tasks = match load_json::<Vec<Task>>(kv.as_ref(), keys::MOCK_TASKS).await? {
            Some(tasks) => {
                debug!("Loaded {} stored tasks", tasks.len());
                tasks
            }
            None => {
                info!("No stored tasks, using defaults");
                seed_tasks(user_id)
            }
        };

        Ok(Self {
            kv,
            tasks: RwLock::new(tasks),
        })
    }

    async fn persist(&self, tasks: &[Task]) -> Result<()> {
        save_json(self.kv.as_ref(), keys::MOCK_TASKS, tasks).await
    }

    pub async fn list(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }

    pub async fn get(&self, id: &str) -> Option<Task> {
        self.tasks.read().await.iter().find(|t| t.id == id).cloned()
    }

    /// Append a new task with a freshly minted id
    pub async fn create(&self, request: CreateTaskRequest, user_id: &str) -> Result<Task> {
        let mut tasks = self.tasks.write().await;

        let mut id = generate_task_id();
        while tasks.iter().any(|t| t.id == id) {
            id = generate_task_id();
        }

        let task = Task::new(id, user_id, request.title, request.description)
            .with_status(request.status);
        tasks.push(task.clone());
        self.persist(&tasks).await?;
        Ok(task)
    }

    /// Merge `patch` into the task and bump its timestamp
    pub async fn update(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;

        task.apply(patch);
        let updated = task.clone();
        self.persist(&tasks).await?;
        Ok(updated)
    }

    /// Remove the first task with this id
    pub async fn delete(&self, id: &str) -> Result<Task> {
        let mut tasks = self.tasks.write().await;
        let index = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;

        let removed = tasks.remove(index);
        self.persist(&tasks).await?;
        Ok(removed)
    }
}
