use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, LoadPolicyConfig, StorageConfig};
use service::{runtime, LoadPolicy, PostStore};
use tracing::info;

use crate::routes::{self, AppState};

fn load_policy(cfg: LoadPolicyConfig) -> LoadPolicy {
    match cfg {
        LoadPolicyConfig::Lenient => LoadPolicy::Lenient,
        LoadPolicyConfig::Strict => LoadPolicy::Strict,
    }
}

/// Build handler state around a file-backed post store.
pub fn build_state(storage: &StorageConfig) -> AppState {
    let store = PostStore::new(storage.path.clone(), load_policy(storage.load_policy));
    AppState::new(Arc::new(store))
}

/// Build the router for the given configuration.
pub fn build_app(cfg: &AppConfig) -> Router {
    routes::build_router(build_state(&cfg.storage))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.storage.path).await?;

    let app = build_app(&cfg);

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        %addr,
        storage = %cfg.storage.path.display(),
        policy = ?cfg.storage.load_policy,
        "starting blog server"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
