//! Type-safe connection identifier.
//!
//! [`ConnectionId`] wraps a UUID v4 so that connection identities cannot be
//! confused with any other UUID flowing through the hub.

use std::fmt;

/// Identity of one connected WebSocket client.
///
/// Minted by the connection handler when a socket is accepted and stable
/// for the lifetime of that socket. The hub only ever references it as a
/// key in its registry and room rosters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(uuid::Uuid);

impl ConnectionId {
    /// Creates a new random `ConnectionId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
