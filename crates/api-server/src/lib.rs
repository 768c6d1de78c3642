//! Mock task API
//!
//! Stands in for a real backend: a fixed login account, bearer-checked task
//! CRUD persisted into a key-value store, and simulated network latency.
//! Serve it over HTTP with the `taskdeck-api` binary or intercept requests
//! in process with [`InterceptTransport`].

pub mod auth;
pub mod config;
pub mod intercept;
pub mod latency;
pub mod routes;
pub mod state;
pub mod store;

use axum::Router;

pub use config::{ApiConfig, ServerConfig};
pub use intercept::InterceptTransport;
pub use latency::{Endpoint, LatencyProfile};
pub use state::AppState;

/// All routes bound to `state`
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::auth::router())
        .merge(routes::task::router())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use taskdeck_core::storage::MemoryStore;

    use crate::config::ApiConfig;
    use crate::state::AppState;

    pub async fn build_state() -> AppState {
        build_state_with(ApiConfig::default()).await
    }

    pub async fn build_state_with(config: ApiConfig) -> AppState {
        AppState::new(config.without_latency(), Arc::new(MemoryStore::new()))
            .await
            .unwrap()
    }
}
