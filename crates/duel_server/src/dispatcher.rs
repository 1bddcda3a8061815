//! Turns player actions into game operations and addressed replies.
//!
//! The dispatcher is synchronous and knows nothing about sockets: it
//! takes one action, changes at most one room, and returns who should
//! hear about it.

use crate::protocol::{ClientMessage, ROOM_UNAVAILABLE, ServerMessage};
use crate::registry::RoomRegistry;
use crate::router::ConnectionRouter;
use derive_new::new;
use duel_tictactoe::{ConnectionId, GameError, MAX_PLAYERS, Point, RoomToken, Symbol};
use tracing::{debug, info, instrument, warn};

/// One outbound message for one connection.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Delivery {
    /// Who receives it.
    pub recipient: ConnectionId,
    /// What they receive.
    pub message: ServerMessage,
}

/// Owns the room and connection tables and applies actions to them.
#[derive(Debug, Default)]
pub struct Dispatcher {
    registry: RoomRegistry,
    router: ConnectionRouter,
}

impl Dispatcher {
    /// Creates a dispatcher around `registry` with no connections bound.
    pub fn new(registry: RoomRegistry) -> Self {
        Self {
            registry,
            router: ConnectionRouter::new(),
        }
    }

    /// Live rooms.
    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// Connection-to-room bindings.
    pub fn router(&self) -> &ConnectionRouter {
        &self.router
    }

    /// Applies one action from `connection`.
    ///
    /// Refusals come back as a single `error` delivery to `connection`;
    /// nothing else is touched.
    #[instrument(skip(self))]
    pub fn handle(&mut self, connection: ConnectionId, message: ClientMessage) -> Vec<Delivery> {
        let result = match message {
            ClientMessage::CreateRoom => return self.create_room(connection),
            ClientMessage::JoinRoom { room } => self.join_room(connection, room),
            ClientMessage::SubmitMove {
                room,
                symbol,
                point,
            } => self.submit_move(connection, room, symbol, point),
            ClientMessage::RequestRematch => self.request_rematch(connection),
        };

        result.unwrap_or_else(|error| {
            warn!(%connection, code = error.code(), "Action rejected");
            vec![Delivery::new(connection, ServerMessage::rejected(error))]
        })
    }

    /// Drops `connection` from its room, destroying the room if it is now empty.
    #[instrument(skip(self))]
    pub fn disconnect(&mut self, connection: ConnectionId) -> Vec<Delivery> {
        self.leave(connection);
        Vec::new()
    }

    fn create_room(&mut self, connection: ConnectionId) -> Vec<Delivery> {
        // The current seat is kept if no room can be created.
        let room = match self.registry.create_room() {
            Ok(room) => room,
            Err(error) => {
                warn!(%connection, %error, "Room creation failed");
                return vec![Delivery::new(
                    connection,
                    ServerMessage::Error {
                        code: ROOM_UNAVAILABLE.to_string(),
                        message: error.message,
                    },
                )];
            }
        };

        self.leave(connection);
        self.seat(connection, &room).unwrap_or_else(|error| {
            // A fresh room always has a free seat.
            warn!(%connection, %room, code = error.code(), "Seating in new room failed");
            vec![Delivery::new(connection, ServerMessage::rejected(error))]
        })
    }

    fn join_room(
        &mut self,
        connection: ConnectionId,
        room: RoomToken,
    ) -> Result<Vec<Delivery>, GameError> {
        let game = self.registry.get(&room).ok_or(GameError::InvalidRoom)?;

        if self.router.room_of(connection) == Some(&room) {
            let symbol = game.symbol_of(connection).ok_or(GameError::InvalidRoom)?;
            debug!(%connection, %room, "Already in room");
            return Ok(vec![Delivery::new(
                connection,
                ServerMessage::RoomJoined {
                    room: room.clone(),
                    symbol,
                    state: game.state_for(connection),
                },
            )]);
        }

        if self.router.count_in_room(&room) >= MAX_PLAYERS || game.players().is_full() {
            return Err(GameError::RoomFull);
        }

        self.leave(connection);
        self.seat(connection, &room)
    }

    fn submit_move(
        &mut self,
        connection: ConnectionId,
        room: Option<RoomToken>,
        symbol: Symbol,
        point: Point,
    ) -> Result<Vec<Delivery>, GameError> {
        let bound = self
            .router
            .room_of(connection)
            .cloned()
            .ok_or(GameError::InvalidRoom)?;
        if room.is_some_and(|named| named != bound) {
            return Err(GameError::InvalidRoom);
        }

        let members = self.router.members(&bound);
        let game = self
            .registry
            .get_mut(&bound)
            .ok_or(GameError::InvalidRoom)?;

        // Players may only move their own symbol; a finished game reports GameOver first.
        if game.symbol_of(connection) != Some(symbol) && !game.is_over() {
            return Err(GameError::NotYourTurn);
        }

        let over = game.play(symbol, point)?;
        let mut deliveries = broadcast(&members, &ServerMessage::MoveApplied { symbol, point });
        if over {
            info!(room = %bound, outcome = ?game.outcome(), "Game over");
            deliveries.extend(broadcast(&members, &ServerMessage::game_over(game.win_state())));
        }
        Ok(deliveries)
    }

    fn request_rematch(&mut self, connection: ConnectionId) -> Result<Vec<Delivery>, GameError> {
        let room = self
            .router
            .room_of(connection)
            .cloned()
            .ok_or(GameError::InvalidRoom)?;
        let members = self.router.members(&room);
        let game = self.registry.get_mut(&room).ok_or(GameError::InvalidRoom)?;

        game.rematch()?;
        Ok(members
            .into_iter()
            .map(|member| {
                Delivery::new(
                    member,
                    ServerMessage::NewGame {
                        state: game.state_for(member),
                    },
                )
            })
            .collect())
    }

    /// Seats `connection` in `room` and announces it.
    fn seat(&mut self, connection: ConnectionId, room: &RoomToken) -> Result<Vec<Delivery>, GameError> {
        let game = self.registry.get_mut(room).ok_or(GameError::InvalidRoom)?;
        let symbol = game.add_player(connection)?;
        self.router.bind(connection, room.clone());
        info!(%connection, %room, %symbol, "Player joined room");

        let mut deliveries = vec![Delivery::new(
            connection,
            ServerMessage::RoomJoined {
                room: room.clone(),
                symbol,
                state: game.state_for(connection),
            },
        )];

        let members = self.router.members(room);
        if members.len() == MAX_PLAYERS {
            deliveries.extend(
                members
                    .into_iter()
                    .filter(|member| *member != connection)
                    .map(|member| Delivery::new(member, ServerMessage::PlayerJoined { symbol })),
            );
        }
        Ok(deliveries)
    }

    /// Removes `connection` from whatever room it is in.
    fn leave(&mut self, connection: ConnectionId) {
        let Some(room) = self.router.unbind(connection) else {
            return;
        };
        if let Some(game) = self.registry.get_mut(&room) {
            game.remove_player(connection);
        }
        if self.router.count_in_room(&room) == 0 {
            self.registry.destroy(&room);
        }
        debug!(%connection, %room, "Left room");
    }
}

fn broadcast(members: &[ConnectionId], message: &ServerMessage) -> Vec<Delivery> {
    members
        .iter()
        .map(|member| Delivery::new(*member, message.clone()))
        .collect()
}
