//! Scoped deregistration for a connection.

use super::handle::HubHandle;
use crate::domain::{ConnectionId, OutboundTx};
use crate::error::HubError;

/// Proof that a connection is registered with the hub.
///
/// The guard submits the connection's removal exactly once: either through
/// [`RegistrationGuard::release`] on an orderly exit, or from `Drop` if the
/// owning handler is cancelled or unwinds first.
#[derive(Debug)]
pub struct RegistrationGuard {
    hub: HubHandle,
    id: Option<ConnectionId>,
}

impl RegistrationGuard {
    /// Registers `id` with the hub and arms the guard.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::HubUnavailable`] if the hub has stopped. Nothing
    /// was registered in that case, so no removal is owed.
    pub async fn register(
        hub: HubHandle,
        id: ConnectionId,
        outbound: OutboundTx,
    ) -> Result<Self, HubError> {
        hub.register(id, outbound).await?;
        Ok(Self { hub, id: Some(id) })
    }

    /// The guarded connection.
    #[must_use]
    pub fn id(&self) -> Option<ConnectionId> {
        self.id
    }

    /// Submits the removal and waits for the mailbox to take it.
    pub async fn release(mut self) {
        if let Some(id) = self.id.take()
            && let Err(err) = self.hub.remove(id).await
        {
            tracing::debug!(connection_id = %id, error = %err, "removal not delivered");
        }
    }
}

impl Drop for RegistrationGuard {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.hub.remove_detached(id);
        }
    }
}
