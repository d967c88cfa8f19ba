//! # bid-hub
//!
//! Real-time broadcast hub for room-scoped auction bids.
//!
//! Bidders open a WebSocket on `/ws/bid`, pick a room through the query
//! string and send prices as text frames. Every bid is echoed as JSON to
//! all current members of the sender's room, the sender included.
//!
//! ## Architecture
//!
//! ```text
//! Clients (WebSocket)
//!     │
//!     ├── Upgrade handler (ws/handler)
//!     ├── Connection handlers (ws/connection), one task per socket
//!     │
//!     ├── HubHandle ─► bounded mailbox (hub/)
//!     │
//!     └── Hub task: ClientRegistry + RoomTable (domain/)
//! ```
//!
//! The hub task is the only code that touches membership state. Handlers
//! submit events and never read the maps themselves.

pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod hub;
pub mod server;
pub mod ws;
