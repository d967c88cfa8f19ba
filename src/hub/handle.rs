//! Producer side of the hub and its event loop.
//!
//! [`spawn_hub`] starts the one task that owns the [`Hub`] and returns a
//! cloneable [`HubHandle`]. Every connection handler talks to the hub only
//! through that handle. The mailbox is bounded: when it is full, submitters
//! wait, which keeps a slow hub from accumulating an unbounded backlog.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::event::{HubEvent, HubSnapshot};
use super::state::Hub;
use crate::domain::{BidMessage, ConnectionId, OutboundTx, RoomName};
use crate::error::HubError;

/// Cloneable sender into the hub's mailbox.
#[derive(Debug, Clone)]
pub struct HubHandle {
    tx: mpsc::Sender<HubEvent>,
}

impl HubHandle {
    /// Wraps an existing mailbox sender.
    #[must_use]
    pub fn new(tx: mpsc::Sender<HubEvent>) -> Self {
        Self { tx }
    }

    /// Registers a connection and the queue broadcasts are written to.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::HubUnavailable`] if the hub has stopped.
    pub async fn register(&self, id: ConnectionId, outbound: OutboundTx) -> Result<(), HubError> {
        self.submit(HubEvent::Register { id, outbound }).await
    }

    /// Adds a connection to a room.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::HubUnavailable`] if the hub has stopped.
    pub async fn join(&self, id: ConnectionId, room: RoomName) -> Result<(), HubError> {
        self.submit(HubEvent::Join { id, room }).await
    }

    /// Deregisters a connection and takes it out of every room.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::HubUnavailable`] if the hub has stopped.
    pub async fn remove(&self, id: ConnectionId) -> Result<(), HubError> {
        self.submit(HubEvent::Remove(id)).await
    }

    /// Queues a bid for fan-out to its room.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::HubUnavailable`] if the hub has stopped.
    pub async fn broadcast(&self, msg: BidMessage) -> Result<(), HubError> {
        self.submit(HubEvent::Broadcast(msg)).await
    }

    /// Asks the hub for a copy of its membership state. The reply reflects
    /// every event submitted through this handle before the call.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::HubUnavailable`] if the hub has stopped.
    pub async fn snapshot(&self) -> Result<HubSnapshot, HubError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.submit(HubEvent::Inspect(reply_tx)).await?;
        reply_rx.await.map_err(|_| HubError::HubUnavailable)
    }

    /// Submits a removal without waiting for mailbox capacity in the
    /// caller. Used from synchronous contexts such as `Drop`.
    pub fn remove_detached(&self, id: ConnectionId) {
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let hub = self.clone();
                runtime.spawn(async move {
                    if let Err(err) = hub.remove(id).await {
                        tracing::debug!(connection_id = %id, error = %err, "detached removal not delivered");
                    }
                });
            }
            Err(_) => {
                if self.tx.try_send(HubEvent::Remove(id)).is_err() {
                    tracing::warn!(connection_id = %id, "removal dropped outside runtime");
                }
            }
        }
    }

    async fn submit(&self, event: HubEvent) -> Result<(), HubError> {
        self.tx.send(event).await.map_err(|_| HubError::HubUnavailable)
    }
}

/// Spawns the hub task with a mailbox of `intake_capacity` events.
///
/// The task runs until every [`HubHandle`] has been dropped.
#[must_use]
pub fn spawn_hub(intake_capacity: usize, prune_empty_rooms: bool) -> (HubHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(intake_capacity.max(1));
    let task = tokio::spawn(run(Hub::new(prune_empty_rooms), rx));
    (HubHandle::new(tx), task)
}

/// Drains the mailbox, applying each event to `hub` in arrival order.
pub async fn run(mut hub: Hub, mut rx: mpsc::Receiver<HubEvent>) {
    tracing::info!("hub started");
    while let Some(event) = rx.recv().await {
        hub.handle(event);
    }
    tracing::info!("hub stopped");
}
