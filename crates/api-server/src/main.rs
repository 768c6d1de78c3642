//! Standalone server for the mock task API.

use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskdeck_api::{app, ApiConfig, AppState, ServerConfig};
use taskdeck_core::storage::FileKvStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server_config = ServerConfig::from_env();
    let api_config = ApiConfig::from_env();

    tracing::info!("Using data directory: {:?}", server_config.data_dir);
    if api_config.strict_tokens {
        tracing::info!("Strict bearer token validation enabled");
    }

    let kv = FileKvStore::new(server_config.store_path())
        .await
        .context("Failed to open store")?;
    let state = AppState::new(api_config, Arc::new(kv))
        .await
        .context("Failed to initialize application state")?;

    let rest_app = app(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = server_config.addr();
    tracing::info!("REST API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, rest_app).await?;

    Ok(())
}
