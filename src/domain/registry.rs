//! Registry of connected clients.
//!
//! [`ClientRegistry`] maps every registered [`ConnectionId`] to the write
//! handle of its connection. The handle is the sending half of the
//! connection's outbound queue; the socket itself stays owned by the
//! connection handler.

use std::collections::HashMap;

use axum::extract::ws::Utf8Bytes;
use tokio::sync::mpsc;

use super::ConnectionId;

/// Sending half of a connection's outbound frame queue.
pub type OutboundTx = mpsc::Sender<Utf8Bytes>;

/// Set of connections the hub currently knows about.
///
/// An id is present from the moment its registration is processed until
/// its removal is processed.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: HashMap<ConnectionId, OutboundTx>,
}

impl ClientRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` with its outbound handle.
    ///
    /// Returns `false` if `id` was already registered; the handle is
    /// replaced in that case.
    pub fn register(&mut self, id: ConnectionId, outbound: OutboundTx) -> bool {
        self.clients.insert(id, outbound).is_none()
    }

    /// Forgets `id`. Returns `false` if it was not registered.
    pub fn remove(&mut self, id: ConnectionId) -> bool {
        self.clients.remove(&id).is_some()
    }

    /// Returns the outbound handle for `id`, if registered.
    #[must_use]
    pub fn outbound(&self, id: &ConnectionId) -> Option<&OutboundTx> {
        self.clients.get(id)
    }

    /// Number of registered connections.
    #[must_use]
    pub fn count(&self) -> usize {
        self.clients.len()
    }

    /// Iterates over the registered ids.
    pub fn ids(&self) -> impl Iterator<Item = &ConnectionId> {
        self.clients.keys()
    }
}
