mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::json;

use taskdeck_api::ApiConfig;
use taskdeck_client::view::{filter_tasks, TaskFilter};
use taskdeck_client::{AppStore, ClientError};
use taskdeck_core::storage::{keys, load_json, MemoryStore};
use taskdeck_core::task::{CreateTaskRequest, Task, TaskStatus, UpdateTaskRequest};
use taskdeck_core::transport::ApiResponse;

use common::{harness, harness_with, logged_in, FixedTransport, ScriptedTransport};

#[tokio::test]
async fn fetch_replaces_list_with_snapshot() {
    let h = logged_in().await;

    let fetched = h.app.tasks().fetch_tasks().await.unwrap();
    assert_eq!(fetched.len(), 2);

    let state = h.app.tasks().state().await;
    assert_eq!(state.tasks, fetched);
    assert!(!state.is_loading);
    assert!(state.error.is_none());

    // A second fetch resyncs rather than merging
    h.app.tasks().fetch_tasks().await.unwrap();
    assert_eq!(h.app.tasks().tasks().await.len(), 2);
}

#[tokio::test]
async fn create_then_fetch_round_trip() {
    let h = logged_in().await;
    h.app.tasks().fetch_tasks().await.unwrap();

    let created = h
        .app
        .tasks()
        .create_task(CreateTaskRequest::new("A", "B", TaskStatus::Todo))
        .await
        .unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(h.app.tasks().tasks().await.last(), Some(&created));

    let fetched = h.app.tasks().fetch_tasks().await.unwrap();
    let found = fetched.iter().find(|t| t.id == created.id).unwrap();
    assert_eq!(found.title, "A");
    assert_eq!(found.description, "B");
    assert_eq!(found.status, TaskStatus::Todo);

    let persisted: Vec<Task> = load_json(h.store.as_ref(), keys::MOCK_TASKS)
        .await
        .unwrap()
        .unwrap();
    assert!(persisted.iter().any(|t| t.id == created.id));
}

#[tokio::test]
async fn update_status_changes_only_status_and_timestamp() {
    let h = logged_in().await;
    let before = h.app.tasks().fetch_tasks().await.unwrap();

    let updated = h
        .app
        .tasks()
        .update_task(UpdateTaskRequest::new("1").with_status(TaskStatus::Completed))
        .await
        .unwrap();

    let after = h.app.tasks().tasks().await;
    let old = &before[0];
    let new = &after[0];
    assert_eq!(new, &updated);
    assert_eq!(new.status, TaskStatus::Completed);
    assert_eq!(new.title, old.title);
    assert_eq!(new.description, old.description);
    assert_eq!(new.created_at, old.created_at);
    assert_eq!(new.user_id, old.user_id);
    assert!(new.updated_at > old.updated_at);

    // Untargeted tasks are unaffected
    assert_eq!(after[1], before[1]);
}

#[tokio::test]
async fn update_of_unknown_id_surfaces_error_and_keeps_list() {
    let h = logged_in().await;
    let before = h.app.tasks().fetch_tasks().await.unwrap();

    let err = h
        .app
        .tasks()
        .update_task(UpdateTaskRequest::new("missing").with_title("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));

    let state = h.app.tasks().state().await;
    assert_eq!(state.tasks, before);
    assert_eq!(state.error.as_deref(), Some("Task not found"));
}

#[tokio::test]
async fn update_without_id_records_validation_error() {
    let h = logged_in().await;
    let before = h.app.tasks().fetch_tasks().await.unwrap();

    let err = h
        .app
        .tasks()
        .update_task(UpdateTaskRequest::new("").with_title("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation { .. }));

    let state = h.app.tasks().state().await;
    assert_eq!(state.tasks, before);
    assert!(!state.is_loading);
    assert_eq!(state.error.as_deref(), Some("Task id is required"));
}

#[tokio::test]
async fn update_of_task_missing_locally_leaves_list_alone() {
    let h = logged_in().await;

    // Server knows task 1, the client list is still empty
    h.app
        .tasks()
        .update_task(UpdateTaskRequest::new("1").with_title("Renamed"))
        .await
        .unwrap();

    assert!(h.app.tasks().tasks().await.is_empty());
}

#[tokio::test]
async fn delete_twice_is_idempotent_on_the_list() {
    let h = logged_in().await;
    h.app.tasks().fetch_tasks().await.unwrap();

    h.app.tasks().delete_task("1").await.unwrap();
    let after_first = h.app.tasks().tasks().await;
    assert!(after_first.iter().all(|t| t.id != "1"));

    let err = h.app.tasks().delete_task("1").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));

    let state = h.app.tasks().state().await;
    assert_eq!(state.tasks, after_first);
    assert_eq!(state.error.as_deref(), Some("Task not found"));
}

#[tokio::test]
async fn unauthenticated_fetch_keeps_previous_tasks() {
    let h = logged_in().await;
    let before = h.app.tasks().fetch_tasks().await.unwrap();

    h.app.auth().clear_auth().await;
    let err = h.app.tasks().fetch_tasks().await.unwrap_err();
    assert!(matches!(err, ClientError::Auth { .. }));

    let state = h.app.tasks().state().await;
    assert_eq!(state.tasks, before);
    assert_eq!(state.error.as_deref(), Some("Unauthorized"));
    assert!(!state.is_loading);
}

#[tokio::test]
async fn next_successful_operation_clears_error() {
    let h = harness().await;
    assert!(h.app.tasks().fetch_tasks().await.is_err());
    assert!(h.app.tasks().state().await.error.is_some());

    h.app.auth().login("test", "test123").await.unwrap();
    h.app.tasks().fetch_tasks().await.unwrap();
    assert!(h.app.tasks().state().await.error.is_none());
}

#[tokio::test]
async fn clear_error_and_clear_tasks() {
    let h = logged_in().await;
    h.app.tasks().fetch_tasks().await.unwrap();
    let _ = h.app.tasks().delete_task("missing").await;

    h.app.tasks().clear_error().await;
    let state = h.app.tasks().state().await;
    assert!(state.error.is_none());
    assert_eq!(state.tasks.len(), 2);

    h.app.tasks().clear_tasks().await;
    assert!(h.app.tasks().tasks().await.is_empty());
}

#[tokio::test]
async fn fallback_message_when_body_has_none() {
    let store = Arc::new(MemoryStore::new());
    let app = AppStore::new(
        Arc::new(FixedTransport(ApiResponse::new(500, Some(json!({ "error": "boom" }))))),
        store,
    )
    .await;

    let err = app
        .tasks()
        .create_task(CreateTaskRequest::new("A", "B", TaskStatus::Todo))
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::Server { status: 500, message: "Failed to create task".to_string() });
}

#[tokio::test]
async fn malformed_success_body_is_network_error() {
    let store = Arc::new(MemoryStore::new());
    let app = AppStore::new(
        Arc::new(FixedTransport(ApiResponse::new(200, Some(json!({ "not": "a list" }))))),
        store,
    )
    .await;

    let err = app.tasks().fetch_tasks().await.unwrap_err();
    assert!(matches!(err, ClientError::Network { .. }));
    assert_eq!(err.message(), "Failed to fetch tasks");
}

#[tokio::test]
async fn stale_update_response_is_not_applied() {
    let held = Task::new("1", "1", "Held", "Body");
    let mut stale = held.clone();
    stale.title = "Stale".to_string();
    stale.updated_at = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
    let mut fresh = held.clone();
    fresh.title = "Fresh".to_string();
    fresh.touch();

    let transport = ScriptedTransport::new([
        ApiResponse::new(200, Some(json!([held]))),
        ApiResponse::new(200, Some(serde_json::to_value(&stale).unwrap())),
        ApiResponse::new(200, Some(serde_json::to_value(&fresh).unwrap())),
    ]);
    let app = AppStore::new(Arc::new(transport), Arc::new(MemoryStore::new())).await;
    app.tasks().fetch_tasks().await.unwrap();

    let returned = app
        .tasks()
        .update_task(UpdateTaskRequest::new("1").with_title("Stale"))
        .await
        .unwrap();
    assert_eq!(returned.title, "Stale");
    assert_eq!(app.tasks().tasks().await[0].title, "Held");

    app.tasks()
        .update_task(UpdateTaskRequest::new("1").with_title("Fresh"))
        .await
        .unwrap();
    assert_eq!(app.tasks().tasks().await[0].title, "Fresh");
}

#[tokio::test]
async fn filter_in_progress_returns_ordered_subset() {
    let h = logged_in().await;
    for (title, status) in [
        ("first", TaskStatus::InProgress),
        ("second", TaskStatus::Completed),
        ("third", TaskStatus::InProgress),
    ] {
        h.app
            .tasks()
            .create_task(CreateTaskRequest::new(title, "", status))
            .await
            .unwrap();
    }

    let tasks = h.app.tasks().fetch_tasks().await.unwrap();
    let titles: Vec<&str> = filter_tasks(&tasks, TaskFilter::Status(TaskStatus::InProgress), "")
        .into_iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Complete the onboarding", "first", "third"]);
}

#[tokio::test(start_paused = true)]
async fn loading_stays_visible_until_settlement() {
    let h = harness_with(ApiConfig::default()).await;
    h.app.auth().login("test", "test123").await.unwrap();
    let app = Arc::new(h.app);

    let start = tokio::time::Instant::now();
    let worker = {
        let app = Arc::clone(&app);
        tokio::spawn(async move { app.tasks().fetch_tasks().await })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(app.tasks().is_loading().await);
    assert_eq!(app.tasks().pending_operations().await.len(), 1);

    worker.await.unwrap().unwrap();
    assert!(!app.tasks().is_loading().await);
    assert!(start.elapsed() >= Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn overlapping_operations_keep_loading_until_all_settle() {
    let h = harness_with(ApiConfig::default()).await;
    h.app.auth().login("test", "test123").await.unwrap();
    let app = Arc::new(h.app);

    let create = {
        let app = Arc::clone(&app);
        tokio::spawn(async move {
            app.tasks()
                .create_task(CreateTaskRequest::new("slow", "", TaskStatus::Todo))
                .await
        })
    };
    let fetch = {
        let app = Arc::clone(&app);
        tokio::spawn(async move { app.tasks().fetch_tasks().await })
    };

    // The fetch (500ms) settles before the create (600ms)
    fetch.await.unwrap().unwrap();
    assert!(app.tasks().is_loading().await);

    create.await.unwrap().unwrap();
    assert!(!app.tasks().is_loading().await);
}

#[tokio::test(start_paused = true)]
async fn mutations_on_one_task_are_serialized() {
    let h = harness_with(ApiConfig::default()).await;
    h.app.auth().login("test", "test123").await.unwrap();
    h.app.tasks().fetch_tasks().await.unwrap();

    let start = tokio::time::Instant::now();
    let (updated, deleted) = tokio::join!(
        h.app
            .tasks()
            .update_task(UpdateTaskRequest::new("1").with_status(TaskStatus::Completed)),
        h.app.tasks().delete_task("1"),
    );

    assert!(updated.is_ok());
    assert!(deleted.is_ok());
    assert!(start.elapsed() >= Duration::from_millis(700));
    assert!(h.app.tasks().tasks().await.iter().all(|t| t.id != "1"));
}
