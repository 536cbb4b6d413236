use std::sync::Arc;

use anyhow::Context;
use tersa_core::{FetchConfig, Pipeline};
use tersa_server::{
    AppState, ArchiveStore, Backend, FsArchiveStore, MemoryStore, PgSummaryStore, ServerConfig, SummaryStore, router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    let memory = Arc::new(MemoryStore::with_capacity(config.memory_capacity));

    if config.database == Backend::Memory || config.archive == Backend::Memory {
        tracing::warn!(
            capacity = memory.capacity(),
            "using the in-memory store; entries are lost on restart and the oldest are evicted past capacity"
        );
    }

    let summaries: Option<Arc<dyn SummaryStore>> = match &config.database {
        Backend::Configured(url) => {
            let store = PgSummaryStore::connect(url).await.context("Failed to set up the summaries database")?;
            Some(Arc::new(store))
        }
        Backend::Memory => Some(memory.clone()),
        Backend::Disabled => None,
    };

    let archive: Option<Arc<dyn ArchiveStore>> = match &config.archive {
        Backend::Configured(dir) => {
            let store = FsArchiveStore::open(dir)
                .await
                .with_context(|| format!("Failed to open archive directory {}", dir.display()))?;
            Some(Arc::new(store))
        }
        Backend::Memory => Some(memory.clone()),
        Backend::Disabled => None,
    };

    tracing::info!(
        summaries = summaries.as_ref().map_or("disabled", |s| s.name()),
        archive = archive.as_ref().map_or("disabled", |a| a.name()),
        "storage configured"
    );

    let fetch = FetchConfig { timeout: config.fetch_timeout.as_secs(), ..Default::default() };
    let state = AppState { pipeline: Pipeline::new(), fetch, summaries, archive };
    let app = router(Arc::new(state), config.request_timeout);

    let listener = TcpListener::bind(config.bind).await.with_context(|| format!("Failed to bind {}", config.bind))?;
    tracing::info!(addr = %config.bind, "listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await.context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
