//! Events accepted by the hub and the read-only snapshot it can produce.

use std::collections::{BTreeMap, BTreeSet};

use tokio::sync::oneshot;

use crate::domain::{BidMessage, ConnectionId, OutboundTx, RoomName};

/// A single request to the hub.
///
/// All variants travel through one FIFO mailbox, so events submitted by the
/// same producer are processed in submission order.
#[derive(Debug)]
pub enum HubEvent {
    /// A connection came up. Carries the handle the hub writes broadcasts to.
    Register {
        /// Connection being registered.
        id: ConnectionId,
        /// Outbound queue of that connection.
        outbound: OutboundTx,
    },
    /// Add a connection to a room roster.
    Join {
        /// Joining connection.
        id: ConnectionId,
        /// Room to join.
        room: RoomName,
    },
    /// A connection went away. Idempotent.
    Remove(ConnectionId),
    /// Fan a bid out to its room.
    Broadcast(BidMessage),
    /// Report the current membership state.
    Inspect(oneshot::Sender<HubSnapshot>),
}

/// Point-in-time copy of the hub's membership state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HubSnapshot {
    /// Registered connections.
    pub clients: BTreeSet<ConnectionId>,
    /// Every room with its roster, empty rosters included.
    pub rooms: BTreeMap<RoomName, BTreeSet<ConnectionId>>,
}

impl HubSnapshot {
    /// Returns `true` if `id` is registered.
    #[must_use]
    pub fn is_registered(&self, id: ConnectionId) -> bool {
        self.clients.contains(&id)
    }

    /// Returns the roster of `room`, if the room exists.
    #[must_use]
    pub fn roster(&self, room: &str) -> Option<&BTreeSet<ConnectionId>> {
        self.rooms.get(room)
    }

    /// Number of members in `room`, zero if the room does not exist.
    #[must_use]
    pub fn member_count(&self, room: &str) -> usize {
        self.roster(room).map_or(0, BTreeSet::len)
    }

    /// Returns `true` if `id` appears in any roster.
    #[must_use]
    pub fn in_any_room(&self, id: ConnectionId) -> bool {
        self.rooms.values().any(|roster| roster.contains(&id))
    }
}
