//! Duel tic-tac-toe - authoritative game logic for two remote players.
//!
//! # Architecture
//!
//! - **Point**: board coordinates and the arithmetic for diagonal scans
//! - **Board**: fixed 3x3 grid of cells
//! - **Rules**: win detection around the last move
//! - **Roster**: join-order seat assignment (first joiner is X)
//! - **Game**: the state machine tying them together
//!
//! The crate does no I/O. A host feeds it player actions and forwards the
//! results however it likes.
//!
//! # Example
//!
//! ```
//! use duel_tictactoe::{ConnectionId, Game, Outcome, Point, RoomToken, Symbol};
//!
//! let mut game = Game::new(RoomToken::from("a1b2c3d4e5"));
//! let alice = ConnectionId::new(1);
//! let bob = ConnectionId::new(2);
//! assert_eq!(game.add_player(alice), Ok(Symbol::X));
//! assert_eq!(game.add_player(bob), Ok(Symbol::O));
//!
//! let over = game.play(Symbol::X, Point::CENTER).unwrap();
//! assert!(!over);
//! assert_eq!(game.turn(), Symbol::O);
//! assert_eq!(game.outcome(), Outcome::InProgress);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod game;
mod point;
mod roster;
mod rules;
mod snapshot;
mod types;

pub use board::Board;
pub use error::GameError;
pub use game::{Game, MAX_MOVES};
pub use point::{BOARD_SIZE, Point};
pub use roster::{MAX_PLAYERS, Roster};
pub use rules::{MIN_MOVES_FOR_WIN, is_winning_move};
pub use snapshot::{GameSnapshot, WinState};
pub use types::{Cell, ConnectionId, Outcome, RoomToken, Symbol};
