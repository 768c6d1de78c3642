//! In-process request interception
//!
//! [`InterceptTransport`] hands client requests straight to the mock
//! router, so a client can run against the mock API with no socket
//! involved.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::AUTHORIZATION, header::CONTENT_TYPE, Request},
    Router,
};
use tower::ServiceExt;
use tracing::debug;

use taskdeck_core::storage::{KeyValueStore, MemoryStore};
use taskdeck_core::transport::{ApiRequest, ApiResponse, Transport, TransportFuture};
use taskdeck_core::{Error, Result};

use crate::config::ApiConfig;
use crate::state::AppState;

pub struct InterceptTransport {
    router: Router,
    state: AppState,
}

impl InterceptTransport {
    pub fn new(state: AppState) -> Self {
        Self {
            router: crate::app(state.clone()),
            state,
        }
    }

    /// Mock API persisting into `kv`
    pub async fn with_store(config: ApiConfig, kv: Arc<dyn KeyValueStore>) -> Result<Self> {
        Ok(Self::new(AppState::new(config, kv).await?))
    }

    /// Mock API over a fresh in-memory store
    pub async fn in_memory(config: ApiConfig) -> Result<Self> {
        Self::with_store(config, Arc::new(MemoryStore::new())).await
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse> {
        debug!("Intercepted {} {}", request.method, request.path);

        let mut builder = Request::builder()
            .method(request.method.as_str())
            .uri(request.path.as_str());
        if let Some(token) = &request.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match &request.body {
            Some(value) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(value)?)
            }
            None => Body::empty(),
        };
        let http_request = builder
            .body(body)
            .map_err(|err| Error::Transport(format!("Failed to build request: {}", err)))?;

        let response = self
            .router
            .clone()
            .oneshot(http_request)
            .await
            .map_err(|err| Error::Transport(err.to_string()))?;

        let status = response.status().as_u16();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|err| Error::Transport(format!("Failed to read response body: {}", err)))?;
        let body = serde_json::from_slice(&bytes).ok();

        Ok(ApiResponse::new(status, body))
    }
}

impl Transport for InterceptTransport {
    fn send(&self, request: ApiRequest) -> TransportFuture<'_> {
        Box::pin(self.dispatch(request))
    }
}
