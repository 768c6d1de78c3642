#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use taskdeck_api::{ApiConfig, InterceptTransport};
use taskdeck_client::AppStore;
use taskdeck_core::storage::MemoryStore;
use taskdeck_core::transport::{ApiRequest, ApiResponse, Transport, TransportFuture};
use taskdeck_core::Error;

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub app: AppStore,
}

/// Client and mock API sharing one store, without latency
pub async fn harness() -> Harness {
    harness_with(ApiConfig::default().without_latency()).await
}

pub async fn harness_with(config: ApiConfig) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let transport = InterceptTransport::with_store(config, store.clone())
        .await
        .unwrap();
    let app = AppStore::new(Arc::new(transport), store.clone()).await;
    Harness { store, app }
}

pub async fn logged_in() -> Harness {
    let harness = harness().await;
    harness.app.auth().login("test", "test123").await.unwrap();
    harness
}

/// Transport whose API is never reachable
pub struct UnreachableTransport;

impl Transport for UnreachableTransport {
    fn send(&self, _request: ApiRequest) -> TransportFuture<'_> {
        Box::pin(async { Err(Error::Transport("connection refused".to_string())) })
    }
}

/// Transport answering every request with the same response
pub struct FixedTransport(pub ApiResponse);

impl Transport for FixedTransport {
    fn send(&self, _request: ApiRequest) -> TransportFuture<'_> {
        let response = self.0.clone();
        Box::pin(async move { Ok(response) })
    }
}

/// Transport replaying canned responses in order
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
}

impl ScriptedTransport {
    pub fn new(responses: impl IntoIterator<Item = ApiResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
        }
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, _request: ApiRequest) -> TransportFuture<'_> {
        let next = self.responses.lock().unwrap().pop_front();
        Box::pin(async move {
            next.ok_or_else(|| Error::Transport("script exhausted".to_string()))
        })
    }
}
