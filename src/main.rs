use anyhow::Context;
use tracing_subscriber::EnvFilter;

use quill::config::AppConfig;
use quill::server::{AppState, build_router};
use quill::store::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;

    // RUST_LOG wins over the configured level when set.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let store = MemoryStore::new();
    let app = build_router(AppState::new(store));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "quill server listening");

    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
