//! Axum WebSocket upgrade handler for the bid endpoint.

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::rejection::QueryRejection;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::{Query, State};
use axum::response::Response;

use super::connection::run_connection;
use super::params::JoinParams;
use crate::app_state::AppState;
use crate::error::HubError;

/// Path of the bid endpoint.
pub const BID_PATH: &str = "/ws/bid";

/// `ANY /ws/bid?name=..&room=..` — upgrade to a bidder WebSocket.
///
/// # Errors
///
/// Returns [`HubError::UpgradeRequired`] (426, empty body) for any request
/// that is not a valid WebSocket upgrade. The query string never causes a
/// rejection: unusable input falls back to the join defaults.
pub async fn bid_ws_handler(
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, HubError> {
    let ws = upgrade.map_err(|rejection| {
        tracing::debug!(%rejection, "rejected non-upgrade request");
        HubError::UpgradeRequired
    })?;

    let params: JoinParams = match query {
        Ok(Query(pairs)) => pairs.into_iter().collect(),
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable query string, using join defaults");
            JoinParams::default()
        }
    };

    let hub = state.hub.clone();
    let outbound_capacity = state.outbound_capacity;
    Ok(ws.on_upgrade(move |socket| run_connection(socket, params, hub, outbound_capacity)))
}
