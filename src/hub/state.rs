//! The hub state machine.
//!
//! [`Hub`] owns the client registry and the room table. Its transition
//! methods are synchronous and are only ever called from the hub task, one
//! event at a time, so neither structure needs a lock.

use tokio::sync::mpsc::error::TrySendError;

use super::event::{HubEvent, HubSnapshot};
use crate::domain::{BidMessage, ClientRegistry, ConnectionId, OutboundTx, RoomName, RoomTable};

/// Single owner of all membership state.
#[derive(Debug, Default)]
pub struct Hub {
    clients: ClientRegistry,
    rooms: RoomTable,
}

impl Hub {
    /// Creates an empty hub. See [`RoomTable::new`] for `prune_empty_rooms`.
    #[must_use]
    pub fn new(prune_empty_rooms: bool) -> Self {
        Self {
            clients: ClientRegistry::new(),
            rooms: RoomTable::new(prune_empty_rooms),
        }
    }

    /// Applies one event.
    pub fn handle(&mut self, event: HubEvent) {
        match event {
            HubEvent::Register { id, outbound } => self.register(id, outbound),
            HubEvent::Join { id, room } => self.join_room(id, room),
            HubEvent::Remove(id) => self.remove(id),
            HubEvent::Broadcast(msg) => {
                self.broadcast(&msg);
            }
            HubEvent::Inspect(reply) => {
                // The requester may have given up waiting.
                let _ = reply.send(self.snapshot());
            }
        }
    }

    /// Adds `id` to the client registry.
    pub fn register(&mut self, id: ConnectionId, outbound: OutboundTx) {
        if self.clients.register(id, outbound) {
            tracing::debug!(connection_id = %id, total = self.clients.count(), "client registered");
        } else {
            tracing::debug!(connection_id = %id, "client re-registered, outbound replaced");
        }
    }

    /// Adds `id` to the roster of `room`, creating the room if needed.
    pub fn join_room(&mut self, id: ConnectionId, room: RoomName) {
        let label = room.clone();
        if self.rooms.join(id, room) {
            tracing::info!(connection_id = %id, room = %label, "client joined room");
        }
    }

    /// Removes `id` from the registry and from every roster.
    pub fn remove(&mut self, id: ConnectionId) {
        let was_registered = self.clients.remove(id);
        for room in self.rooms.leave_all(id) {
            tracing::info!(connection_id = %id, room = %room, "client left room");
        }
        if was_registered {
            tracing::debug!(connection_id = %id, total = self.clients.count(), "client removed");
        }
    }

    /// Offers `msg` to every current member of its room, the sender
    /// included, and returns how many members accepted the frame.
    ///
    /// A missing room, a member without an outbound handle, or a member
    /// whose queue is full or closed only costs that delivery.
    pub fn broadcast(&self, msg: &BidMessage) -> usize {
        let Some(roster) = self.rooms.roster(msg.room().as_str()) else {
            tracing::trace!(room = %msg.room(), "bid for room without roster dropped");
            return 0;
        };

        let frame = match msg.to_frame() {
            Ok(frame) => frame,
            Err(err) => {
                tracing::warn!(room = %msg.room(), error = %err, "failed to encode bid");
                return 0;
            }
        };

        let mut delivered = 0;
        for id in roster {
            let Some(outbound) = self.clients.outbound(id) else {
                continue;
            };
            match outbound.try_send(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::debug!(connection_id = %id, "outbound queue full, bid dropped");
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!(connection_id = %id, "outbound queue closed, bid dropped");
                }
            }
        }

        tracing::trace!(room = %msg.room(), recipients = delivered, "bid fanned out");
        delivered
    }

    /// Copies the current membership state.
    #[must_use]
    pub fn snapshot(&self) -> HubSnapshot {
        HubSnapshot {
            clients: self.clients.ids().copied().collect(),
            rooms: self
                .rooms
                .iter()
                .map(|(room, roster)| (room.clone(), roster.iter().copied().collect()))
                .collect(),
        }
    }
}
