//! JSON messages exchanged with players.
//!
//! Every frame is an object tagged by `"type"` (kebab-case); payload
//! fields are camelCase.

use duel_tictactoe::{GameError, GameSnapshot, Point, RoomToken, Symbol, WinState};
use serde::{Deserialize, Serialize};

/// Wire code for frames that could not be decoded.
pub const INVALID_MESSAGE: &str = "INVALID_MESSAGE";

/// Wire code for a room that could not be created.
pub const ROOM_UNAVAILABLE: &str = "ROOM_UNAVAILABLE";

/// Actions a player can send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Open a new room and take its first seat.
    CreateRoom,
    /// Take a seat in an existing room.
    JoinRoom {
        /// Token shared by the room's creator.
        room: RoomToken,
    },
    /// Place a symbol.
    SubmitMove {
        /// Optional; must match the sender's room when present.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room: Option<RoomToken>,
        /// The sender's own symbol.
        symbol: Symbol,
        /// Target cell.
        point: Point,
    },
    /// Start a new match in the sender's room once the current one ended.
    RequestRematch,
}

/// Messages the server sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// The receiver now sits in `room` as `symbol`.
    RoomJoined {
        /// Room token, to share with an opponent.
        room: RoomToken,
        /// The receiver's symbol.
        symbol: Symbol,
        /// Current match state.
        state: GameSnapshot,
    },
    /// An opponent took the other seat.
    PlayerJoined {
        /// The opponent's symbol.
        symbol: Symbol,
    },
    /// A move was accepted.
    MoveApplied {
        /// Who moved.
        symbol: Symbol,
        /// Where.
        point: Point,
    },
    /// The match ended with the last move.
    GameOver {
        /// Winner, absent for a tie.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        winner: Option<Symbol>,
        /// True for a tie.
        is_tie: bool,
    },
    /// A rematch started.
    NewGame {
        /// Fresh match state.
        state: GameSnapshot,
    },
    /// The receiver's last action was refused.
    Error {
        /// Stable machine-readable code.
        code: String,
        /// Human-readable reason.
        message: String,
    },
}

impl ServerMessage {
    /// Builds a `game-over` message.
    pub fn game_over(win_state: WinState) -> Self {
        Self::GameOver {
            winner: *win_state.winner(),
            is_tie: *win_state.is_tie(),
        }
    }

    /// Builds an `error` message from a refused game action.
    pub fn rejected(error: GameError) -> Self {
        Self::Error {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }

    /// Builds an `error` message for an undecodable frame.
    pub fn invalid_message(detail: impl std::fmt::Display) -> Self {
        Self::Error {
            code: INVALID_MESSAGE.to_string(),
            message: format!("Invalid message: {detail}"),
        }
    }
}
