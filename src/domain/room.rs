//! Room names and the room membership table.
//!
//! A room is a named broadcast group. Clients pick their room at join
//! time; any string is a valid room name and rooms come into existence the
//! first time somebody joins them.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ConnectionId;

/// Room used when a client does not name one.
pub const DEFAULT_ROOM: &str = "default";

/// Name of a broadcast room.
///
/// No validation or length limit is applied. [`Default`] yields
/// [`DEFAULT_ROOM`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomName(String);

impl RoomName {
    /// Creates a room name from any string.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the room name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RoomName {
    fn default() -> Self {
        Self(DEFAULT_ROOM.to_string())
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RoomName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for RoomName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Mapping from room name to the set of connections in that room.
///
/// Alongside the rosters the table keeps a reverse index of the rooms each
/// connection joined, so [`RoomTable::leave_all`] only touches the rooms
/// the connection is actually in instead of scanning every roster.
///
/// Empty rosters stay in the table unless pruning was requested at
/// construction time.
#[derive(Debug, Default)]
pub struct RoomTable {
    rosters: HashMap<RoomName, HashSet<ConnectionId>>,
    memberships: HashMap<ConnectionId, HashSet<RoomName>>,
    prune_empty: bool,
}

impl RoomTable {
    /// Creates an empty table. With `prune_empty` set, a roster is dropped
    /// as soon as its last member leaves.
    #[must_use]
    pub fn new(prune_empty: bool) -> Self {
        Self {
            prune_empty,
            ..Self::default()
        }
    }

    /// Adds `id` to `room`, creating the roster if needed.
    ///
    /// Returns `false` if `id` was already a member.
    pub fn join(&mut self, id: ConnectionId, room: RoomName) -> bool {
        let added = self.rosters.entry(room.clone()).or_default().insert(id);
        if added {
            self.memberships.entry(id).or_default().insert(room);
        }
        added
    }

    /// Removes `id` from every roster it is in and returns the rooms it
    /// left. Unknown ids are a no-op.
    pub fn leave_all(&mut self, id: ConnectionId) -> Vec<RoomName> {
        let Some(rooms) = self.memberships.remove(&id) else {
            return Vec::new();
        };

        let mut left = Vec::with_capacity(rooms.len());
        for room in rooms {
            if let Some(roster) = self.rosters.get_mut(&room) {
                roster.remove(&id);
                if self.prune_empty && roster.is_empty() {
                    self.rosters.remove(&room);
                }
            }
            left.push(room);
        }
        left
    }

    /// Returns the roster of `room`, if the room exists.
    #[must_use]
    pub fn roster(&self, room: &str) -> Option<&HashSet<ConnectionId>> {
        self.rosters.get(room)
    }

    /// Iterates over every room and its roster.
    pub fn iter(&self) -> impl Iterator<Item = (&RoomName, &HashSet<ConnectionId>)> {
        self.rosters.iter()
    }
}
