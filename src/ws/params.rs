//! Join parameters taken from the upgrade request's query string.

use crate::domain::RoomName;

/// Who is joining and which room they want.
///
/// `name` defaults to the empty string and `room` to
/// [`crate::domain::DEFAULT_ROOM`]. An empty `room=` counts as absent.
/// When a key is repeated, its first occurrence wins; unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinParams {
    /// Display name attached to every bid from this connection.
    pub name: String,
    /// Room the connection joins.
    pub room: RoomName,
}

impl FromIterator<(String, String)> for JoinParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut name = None;
        let mut room = None;
        for (key, value) in pairs {
            match key.as_str() {
                "name" if name.is_none() => name = Some(value),
                "room" if room.is_none() => room = Some(value),
                _ => {}
            }
        }

        Self {
            name: name.unwrap_or_default(),
            room: room
                .filter(|room| !room.is_empty())
                .map(RoomName::from)
                .unwrap_or_default(),
        }
    }
}
