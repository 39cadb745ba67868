//! HTTP task store.
//!
//! JSON CRUD over the `tasks` table:
//!
//! | Method | Path           | Body                                   |
//! |--------|----------------|----------------------------------------|
//! | GET    | `/tasks/`      | `?offset=&limit=` (limit at most 100)  |
//! | POST   | `/tasks/`      | `{name, priority, date}`               |
//! | PUT    | `/tasks/:id`   | any subset of `{name, priority, date, status}` |
//! | DELETE | `/tasks/:id`   |                                        |
//!
//! Failures come back as `{"detail": "..."}` with 404, 422 or 500.

use crate::db::db::Db;
use crate::libs::config::ServerConfig;
use crate::libs::messages::Message;
use anyhow::Result;
use axum::{
    routing::{get, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub mod handlers;

/// Shared router state. Holds the storage handle only, never a connection.
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
}

pub fn build_router(db: Db) -> Router {
    let state = Arc::new(AppState { db });

    Router::new()
        .route("/", get(handlers::root))
        .route("/tasks/", get(handlers::list_tasks).post(handlers::create_task))
        .route("/tasks/:task_id", put(handlers::update_task).delete(handlers::delete_task))
        .with_state(state)
}

/// Serves the store until Ctrl+C.
pub async fn serve(config: &ServerConfig, db: Db) -> Result<()> {
    let addr: SocketAddr = config.bind_addr.parse()?;
    let app = build_router(db);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "{}", Message::ServerListening(addr.to_string()));
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("{}", Message::ServerStopping);
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
