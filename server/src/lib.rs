//! Todo REST API server.
//!
//! # Overview
//! Serves create/read/update/delete over todo items identified by
//! auto-incrementing integer ids. Ids come from a named counter (`planId`)
//! advanced with one atomic increment-and-fetch per allocation.
//!
//! # Design
//! - [`store::Store`] is the persistence seam; [`store::MemoryStore`] and
//!   [`store::SqliteStore`] implement it.
//! - [`IdAllocator`] mints ids, [`TodoService`] owns the CRUD rules, and
//!   [`routes`] maps them onto HTTP.
//! - [`TodoError`] is the single fault-to-status translator.

pub mod allocator;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod routes;
pub mod service;
pub mod store;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

pub use allocator::IdAllocator;
pub use config::AppConfig;
pub use error::{TodoError, TodoResult};
pub use model::{DeleteAllResponse, Message, Todo, TodoInput, PLAN_ID_SEQUENCE};
pub use service::TodoService;
pub use store::{MemoryStore, SqliteStore, Store, StoreError};

/// Router backed by a fresh in-memory store.
pub fn app() -> Router {
    app_with_store(Arc::new(MemoryStore::new()))
}

pub fn app_with_store(store: Arc<dyn Store>) -> Router {
    routes::router(TodoService::new(store))
}

/// Serves `app` on `listener` until the process receives Ctrl+C or SIGTERM.
pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Opens storage, binds the configured address and serves until shutdown.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let store = store::open(&config.storage).context("failed to open storage")?;
    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        address = %addr,
        backend = ?config.storage.backend,
        "listening"
    );
    run(listener, app_with_store(store))
        .await
        .context("server failed")?;
    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
