//! HTTP surface for confcat.
//!
//! Serves category-filtered session pages, category management and the tag
//! list over axum.

pub mod error;
mod extract;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};

use confcat_core::error::{ConfcatError, Result};

pub use crate::error::ApiError;
pub use crate::state::ServerState;

/// Builds the application router.
pub fn router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/api/sessions/category/:category_id",
            get(routes::sessions::sessions_by_category),
        )
        .route(
            "/api/categories",
            get(routes::categories::list_categories).post(routes::categories::create_category),
        )
        .route(
            "/api/categories/:id",
            get(routes::categories::get_category)
                .put(routes::categories::update_category)
                .delete(routes::categories::delete_category),
        )
        .route("/api/tags", get(routes::tags::list_tags))
        .with_state(state)
        .layer(cors)
}

/// A running HTTP server.
///
/// Dropping it signals a graceful shutdown.
pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Server {
    /// Binds `bind_addr` and starts serving in the background. Port 0 picks
    /// a free port; see [`Server::addr`].
    pub async fn start(bind_addr: &str, state: ServerState) -> Result<Self> {
        let listener = TcpListener::bind(bind_addr)
            .await
            .map_err(|e| ConfcatError::io(format!("Failed to bind {}: {}", bind_addr, e)))?;
        let addr = listener.local_addr()?;
        let app = router(Arc::new(state));
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = served {
                tracing::error!(target: "confcat::server", "Server stopped with error: {}", e);
            }
        });

        tracing::info!(target: "confcat::server", "Listening on http://{}", addr);
        Ok(Self {
            addr,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signals shutdown without waiting.
    pub fn shutdown(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.send(());
        }
    }

    /// Signals shutdown and waits for in-flight requests to finish.
    pub async fn stop(mut self) {
        self.shutdown();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        tracing::info!(target: "confcat::server", "Server stopped");
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.shutdown();
    }
}
