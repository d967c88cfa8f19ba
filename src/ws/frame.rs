//! Classification of inbound WebSocket frames.

use axum::extract::ws::Message;

/// What the read loop should do with the next item from the socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A text frame; its body is the price text.
    Bid(String),
    /// A frame that carries no bid (binary, ping, pong).
    Ignored,
    /// The peer closed, the stream ended, or reading failed.
    Closed,
}

/// Maps one `StreamExt::next` result to an [`Inbound`].
#[must_use]
pub fn classify(item: Option<Result<Message, axum::Error>>) -> Inbound {
    match item {
        Some(Ok(Message::Text(text))) => Inbound::Bid(text.as_str().to_owned()),
        Some(Ok(Message::Binary(_) | Message::Ping(_) | Message::Pong(_))) => Inbound::Ignored,
        Some(Ok(Message::Close(_))) | None => Inbound::Closed,
        Some(Err(err)) => {
            tracing::debug!(error = %err, "websocket read failed");
            Inbound::Closed
        }
    }
}
