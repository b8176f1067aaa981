pub mod config;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod sse;

use axum::Router;
use ps_db::DbPool;
use ps_relay::Relay;
use std::future::Future;
use tokio::net::TcpListener;

pub use config::{ConfigError, ServerConfig};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub relay: Relay,
}

impl AppState {
    pub fn new(pool: DbPool, relay: Relay) -> Self {
        Self { pool, relay }
    }
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
}

/// Serves the API until `shutdown` resolves, then lets in-flight requests
/// finish.
pub async fn serve<F>(
    state: AppState,
    addr: std::net::SocketAddr,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await
}
