//! Shared application state injected into all Axum handlers.

use crate::hub::HubHandle;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Mailbox of the hub task.
    pub hub: HubHandle,
    /// Outbound frame buffer size for each new connection.
    pub outbound_capacity: usize,
}
