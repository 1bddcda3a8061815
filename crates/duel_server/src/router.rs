//! Which room each live connection is in.

use duel_tictactoe::{ConnectionId, RoomToken};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Maps each connection to the token of the room it is in.
///
/// Holds tokens only; the games themselves live in the
/// [`RoomRegistry`](crate::RoomRegistry).
#[derive(Debug, Clone, Default)]
pub struct ConnectionRouter {
    rooms: HashMap<ConnectionId, RoomToken>,
}

impl ConnectionRouter {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `connection` in `room`, returning the room it was in before.
    #[instrument(skip(self))]
    pub fn bind(&mut self, connection: ConnectionId, room: RoomToken) -> Option<RoomToken> {
        let previous = self.rooms.insert(connection, room);
        debug!(?previous, "Connection bound");
        previous
    }

    /// Forgets `connection`, returning the room it was in.
    #[instrument(skip(self))]
    pub fn unbind(&mut self, connection: ConnectionId) -> Option<RoomToken> {
        let previous = self.rooms.remove(&connection);
        debug!(?previous, "Connection unbound");
        previous
    }

    /// The room `connection` is in.
    pub fn room_of(&self, connection: ConnectionId) -> Option<&RoomToken> {
        self.rooms.get(&connection)
    }

    /// Number of connections in `room`.
    pub fn count_in_room(&self, room: &RoomToken) -> usize {
        self.rooms.values().filter(|bound| *bound == room).count()
    }

    /// Connections in `room`, ordered by id.
    pub fn members(&self, room: &RoomToken) -> Vec<ConnectionId> {
        let mut members: Vec<_> = self
            .rooms
            .iter()
            .filter(|(_, bound)| *bound == room)
            .map(|(connection, _)| *connection)
            .collect();
        members.sort();
        members
    }

    /// Number of bound connections.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// True when no connection is bound.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
