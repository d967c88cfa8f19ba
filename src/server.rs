//! Router assembly and the HTTP serve loop.

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::config::HubConfig;
use crate::hub::spawn_hub;
use crate::ws;

/// Builds the application router around an existing hub.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(ws::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the hub and serves the bid endpoint on `listener` until
/// `shutdown` resolves.
///
/// # Errors
///
/// Returns the I/O error that stopped the accept loop.
pub async fn serve<F>(listener: TcpListener, config: &HubConfig, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (hub, _hub_task) = spawn_hub(config.hub_intake_capacity, config.prune_empty_rooms);
    let state = AppState {
        hub,
        outbound_capacity: config.client_outbound_capacity,
    };

    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "server listening");
    }
    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown)
        .await
}
