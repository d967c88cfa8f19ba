//! Per-connection handler.
//!
//! Each accepted socket gets one handler task. It registers the
//! connection, joins its room, turns every text frame into a bid for the
//! hub, and deregisters on the way out. Outbound frames written by the hub
//! are drained into the socket by a separate write pump so a slow or broken
//! socket never holds up the hub.

use axum::extract::ws::{Message, Utf8Bytes, WebSocket};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tracing::Instrument;

use super::frame::{Inbound, classify};
use super::params::JoinParams;
use crate::domain::{BidMessage, ConnectionId, RoomName};
use crate::error::HubError;
use crate::hub::{HubHandle, RegistrationGuard};

/// Runs a bidder connection until the socket closes or fails.
pub async fn run_connection(
    socket: WebSocket,
    params: JoinParams,
    hub: HubHandle,
    outbound_capacity: usize,
) {
    let id = ConnectionId::new();
    let span = tracing::info_span!("connection", connection_id = %id, room = %params.room);
    serve(socket, id, params, hub, outbound_capacity)
        .instrument(span)
        .await;
}

async fn serve(
    socket: WebSocket,
    id: ConnectionId,
    params: JoinParams,
    hub: HubHandle,
    outbound_capacity: usize,
) {
    let (ws_tx, mut ws_rx) = socket.split();
    let (outbound_tx, outbound_rx) = mpsc::channel(outbound_capacity.max(1));
    let (close_tx, close_rx) = oneshot::channel();
    let pump = tokio::spawn(write_pump(ws_tx, outbound_rx, close_rx).in_current_span());

    tracing::debug!(name = %params.name, "connection accepted");
    if let Err(err) = session(&mut ws_rx, id, params, hub, outbound_tx).await {
        tracing::warn!(error = %err, "connection ended early");
    }

    let _ = close_tx.send(());
    if let Err(err) = pump.await {
        tracing::debug!(error = %err, "write pump task failed");
    }
    tracing::debug!("connection closed");
}

/// Registration, read loop and deregistration.
async fn session(
    ws_rx: &mut SplitStream<WebSocket>,
    id: ConnectionId,
    params: JoinParams,
    hub: HubHandle,
    outbound: mpsc::Sender<Utf8Bytes>,
) -> Result<(), HubError> {
    let JoinParams { name, room } = params;

    let guard = RegistrationGuard::register(hub.clone(), id, outbound).await?;
    hub.join(id, room.clone()).await?;

    let result = read_loop(ws_rx, &hub, &room, &name).await;
    guard.release().await;
    result
}

async fn read_loop(
    ws_rx: &mut SplitStream<WebSocket>,
    hub: &HubHandle,
    room: &RoomName,
    name: &str,
) -> Result<(), HubError> {
    loop {
        match classify(ws_rx.next().await) {
            Inbound::Bid(price) => {
                hub.broadcast(BidMessage::new(room.clone(), name, price))
                    .await?;
            }
            Inbound::Ignored => {}
            Inbound::Closed => return Ok(()),
        }
    }
}

/// Forwards hub output to the socket until told to stop, the queue closes,
/// or a write fails. Always attempts a close handshake on the way out.
async fn write_pump(
    mut sink: SplitSink<WebSocket, Message>,
    mut outbound: mpsc::Receiver<Utf8Bytes>,
    mut close: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            frame = outbound.recv() => {
                let Some(frame) = frame else { break };
                if let Err(err) = sink.send(Message::Text(frame)).await {
                    tracing::debug!(error = %err, "websocket write failed");
                    break;
                }
            }
            _ = &mut close => break,
        }
    }

    // The peer may already be gone.
    let _ = sink.close().await;
}
