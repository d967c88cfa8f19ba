//! WebSocket layer: upgrade endpoint, connection handlers, frame handling.
//!
//! Bidders connect to `/ws/bid?name=<display name>&room=<room>`. Every
//! text frame they send is broadcast to their room as a JSON bid.

pub mod connection;
pub mod frame;
pub mod handler;
pub mod params;

use axum::Router;
use axum::routing::any;

use crate::app_state::AppState;

/// Routes served by the WebSocket layer.
pub fn routes() -> Router<AppState> {
    Router::new().route(handler::BID_PATH, any(handler::bid_ws_handler))
}
