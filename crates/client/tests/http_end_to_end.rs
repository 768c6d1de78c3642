use std::sync::Arc;

use taskdeck_api::{app, ApiConfig, AppState};
use taskdeck_client::{AppStore, ClientError, HttpTransport};
use taskdeck_core::storage::MemoryStore;
use taskdeck_core::task::{CreateTaskRequest, TaskStatus, UpdateTaskRequest};

async fn spawn_server() -> String {
    let state = AppState::new(
        ApiConfig::default().without_latency().with_strict_tokens(),
        Arc::new(MemoryStore::new()),
    )
    .await
    .unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn full_session_over_http() {
    let base_url = spawn_server().await;
    let client = AppStore::new(
        Arc::new(HttpTransport::new(base_url).unwrap()),
        Arc::new(MemoryStore::new()),
    )
    .await;

    let err = client.tasks().fetch_tasks().await.unwrap_err();
    assert!(matches!(err, ClientError::Auth { .. }));

    client.auth().login("test", "test123").await.unwrap();
    assert_eq!(client.tasks().fetch_tasks().await.unwrap().len(), 2);

    let created = client
        .tasks()
        .create_task(CreateTaskRequest::new("Over the wire", "via reqwest", TaskStatus::Todo))
        .await
        .unwrap();

    let updated = client
        .tasks()
        .update_task(UpdateTaskRequest::new(&created.id).with_status(TaskStatus::InProgress))
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::InProgress);

    client.tasks().delete_task(&created.id).await.unwrap();
    assert_eq!(client.tasks().tasks().await.len(), 2);

    client.logout().await.unwrap();
    assert!(!client.auth().is_authenticated().await);

    let err = client.tasks().fetch_tasks().await.unwrap_err();
    assert_eq!(err.message(), "Unauthorized");
}
