//! Recoverable failures reported back to the player who caused them.

use derive_more::{Display, Error};
use strum::IntoStaticStr;

/// Why an action was refused.
///
/// Every variant is an expected outcome of player input. None of them
/// leave the game in a changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Error, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GameError {
    /// No room with that token, or the action names a room the caller is not in.
    #[display("Invalid room")]
    InvalidRoom,
    /// Both seats are taken.
    #[display("Room is full")]
    RoomFull,
    /// The match already ended.
    #[display("Game is over")]
    GameOver,
    /// The symbol does not hold the turn.
    #[display("Not your turn")]
    NotYourTurn,
    /// The target cell already holds a symbol.
    #[display("Point is occupied")]
    PointOccupied,
    /// The target point lies outside the 3x3 board.
    #[display("Invalid point")]
    InvalidPoint,
    /// Rematch requested while the match is still being played.
    #[display("Game is NOT over yet!")]
    NotAllowed,
}

impl GameError {
    /// Stable wire code, e.g. `NOT_YOUR_TURN`.
    pub fn code(self) -> &'static str {
        self.into()
    }
}
