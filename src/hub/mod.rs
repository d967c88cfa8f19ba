//! The hub: single serialized owner of connection and room state.
//!
//! ```text
//! handler ─┐
//! handler ─┼─► HubHandle ──► bounded mailbox ──► hub task (Hub)
//! handler ─┘                                        │
//!                                                   └─► outbound queues ─► write pumps
//! ```
//!
//! Registration, room joins, removals and broadcasts are [`HubEvent`]s.
//! The hub task applies them strictly one at a time, so the registry and
//! room table are never touched concurrently and need no locks.

pub mod event;
pub mod guard;
pub mod handle;
pub mod state;

pub use event::{HubEvent, HubSnapshot};
pub use guard::RegistrationGuard;
pub use handle::{HubHandle, run, spawn_hub};
pub use state::Hub;
