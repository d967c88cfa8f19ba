//! Bid message value object.

use axum::extract::ws::Utf8Bytes;
use serde::{Deserialize, Serialize};

use super::RoomName;

/// One bid posted to a room.
///
/// Serialized on the wire as exactly three fields:
///
/// ```json
/// { "room": "auction-1", "name": "alice", "price": "100" }
/// ```
///
/// The price is the raw text frame the bidder sent; it is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidMessage {
    room: RoomName,
    name: String,
    price: String,
}

impl BidMessage {
    /// Creates a bid for `room` placed by `name`.
    #[must_use]
    pub fn new(room: impl Into<RoomName>, name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            room: room.into(),
            name: name.into(),
            price: price.into(),
        }
    }

    /// Target room.
    #[must_use]
    pub fn room(&self) -> &RoomName {
        &self.room
    }

    /// Display name of the bidder.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price text exactly as received.
    #[must_use]
    pub fn price(&self) -> &str {
        &self.price
    }

    /// Encodes the bid as a JSON text frame.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] if serialization fails.
    pub fn to_frame(&self) -> Result<Utf8Bytes, serde_json::Error> {
        serde_json::to_string(self).map(Utf8Bytes::from)
    }
}
