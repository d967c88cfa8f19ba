//! Domain layer: connection identity, rooms, client registry and bids.
//!
//! These are plain data structures with no synchronization of their own.
//! They are owned and mutated exclusively by the hub task (see
//! [`crate::hub`]).

pub mod bid;
pub mod connection_id;
pub mod registry;
pub mod room;

pub use bid::BidMessage;
pub use connection_id::ConnectionId;
pub use registry::{ClientRegistry, OutboundTx};
pub use room::{DEFAULT_ROOM, RoomName, RoomTable};
