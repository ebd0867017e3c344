//! The task HTTP API.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /api/health` | [`handlers::health_check`] |
//! | `GET /api/tasks` | [`handlers::list_tasks`] |
//! | `POST /api/tasks` | [`handlers::create_task`] |
//! | `PUT /api/tasks/{id}` | [`handlers::update_task`] |
//! | `DELETE /api/tasks/{id}` | [`handlers::delete_task`] |
//! | `POST /api/tasks/order` | [`handlers::reorder_tasks`] |
//!
//! Handlers hold no state besides the shared [`Database`] handle, which
//! connects on the first request that needs it.

pub mod dto;
pub mod error;
pub mod handlers;

use crate::db::database::Database;
use crate::libs::config::Settings;
use crate::libs::messages::Message;
use axum::routing::{get, post, put};
use axum::Router;
use handlers::*;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub database: Arc<Database>,
}

impl AppState {
    pub fn new(database: Database) -> Self {
        Self {
            database: Arc::new(database),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/order", post(reorder_tasks))
        .route("/api/tasks/{id}", put(update_task).delete(delete_task))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl+C or SIGTERM.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let listener = TcpListener::bind(settings.bind_address()).await?;
    tracing::info!(storage = ?settings.storage, "{}", Message::ServerListening(listener.local_addr()?.to_string()));

    let state = AppState::new(Database::new(settings));
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("{}", Message::ServerStopped);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("{}", Message::ServerShuttingDown);
}
