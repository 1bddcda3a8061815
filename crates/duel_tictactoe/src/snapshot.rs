//! Observable views of a match, shaped for the wire.

use crate::board::Board;
use crate::types::{RoomToken, Symbol};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Who won, and whether the match ended level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinState {
    /// Set only when a symbol completed a line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    winner: Option<Symbol>,
    /// True only when the board filled with no line.
    is_tie: bool,
}

impl WinState {
    pub(crate) fn new(winner: Option<Symbol>, is_tie: bool) -> Self {
        Self { winner, is_tie }
    }
}

/// Full state of a match as one player sees it.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Room the match belongs to.
    room: RoomToken,
    /// The receiving player's own symbol; absent for unseated viewers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    symbol: Option<Symbol>,
    /// Symbol due to move next.
    turn: Symbol,
    /// Current board.
    board: Board,
    /// True once the match is won or tied.
    game_over: bool,
    /// Winning symbol, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    winner: Option<Symbol>,
    /// True only for a finished match without a winner.
    is_tie: bool,
}

impl GameSnapshot {
    pub(crate) fn new(
        room: RoomToken,
        symbol: Option<Symbol>,
        turn: Symbol,
        board: Board,
        win_state: WinState,
    ) -> Self {
        Self {
            room,
            symbol,
            turn,
            board,
            game_over: win_state.winner.is_some() || win_state.is_tie,
            winner: win_state.winner,
            is_tie: win_state.is_tie,
        }
    }
}
