//! The authoritative match state machine.
//!
//! ```text
//! InProgress --play(win)------------> Won(symbol)
//! InProgress --play(9th, no win)----> Tied
//! Won | Tied --rematch()------------> InProgress
//! ```

use crate::board::Board;
use crate::error::GameError;
use crate::point::Point;
use crate::roster::Roster;
use crate::rules;
use crate::snapshot::{GameSnapshot, WinState};
use crate::types::{ConnectionId, Outcome, RoomToken, Symbol};
use tracing::{debug, info, instrument, warn};

/// Cells on the board; the match is tied once this many are filled without a line.
pub const MAX_MOVES: usize = 9;

/// One room's match: board, turn, outcome and the two seated players.
#[derive(Debug, Clone)]
pub struct Game {
    room: RoomToken,
    board: Board,
    turn: Symbol,
    moves: usize,
    outcome: Outcome,
    players: Roster,
}

impl Game {
    /// Creates a fresh match for `room`: empty board, X to move, nobody seated.
    #[instrument]
    pub fn new(room: RoomToken) -> Self {
        debug!("Creating game");
        Self {
            room,
            board: Board::new(),
            turn: Symbol::X,
            moves: 0,
            outcome: Outcome::InProgress,
            players: Roster::new(),
        }
    }

    /// Room this match belongs to.
    pub fn room(&self) -> &RoomToken {
        &self.room
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Symbol due to move next.
    pub fn turn(&self) -> Symbol {
        self.turn
    }

    /// Symbols placed since the match (or the last rematch) began.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// How the match stands.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// True once the match is won or tied.
    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    /// Seated players in join order.
    pub fn players(&self) -> &Roster {
        &self.players
    }

    // ─────────────────────────────────────────────────────────────
    //  Seats
    // ─────────────────────────────────────────────────────────────

    /// Seats `connection` and returns its symbol. Idempotent per connection.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::RoomFull`] when two other connections hold the seats.
    #[instrument(skip(self), fields(room = %self.room))]
    pub fn add_player(&mut self, connection: ConnectionId) -> Result<Symbol, GameError> {
        self.players.assign(connection)
    }

    /// Frees the seat held by `connection`. The board is left untouched.
    #[instrument(skip(self), fields(room = %self.room))]
    pub fn remove_player(&mut self, connection: ConnectionId) -> Option<Symbol> {
        self.players.release(connection)
    }

    /// Symbol held by `connection`, if seated.
    pub fn symbol_of(&self, connection: ConnectionId) -> Option<Symbol> {
        self.players.symbol_of(connection)
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves
    // ─────────────────────────────────────────────────────────────

    /// True when the cell at `point` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPoint`] when `point` is off the board.
    pub fn can_play_at(&self, point: Point) -> Result<bool, GameError> {
        self.board.is_empty_at(point)
    }

    /// Places `symbol` at `point` and returns whether the match has ended.
    ///
    /// Checks, in order: the match is still in progress, `symbol` holds the
    /// turn, `point` is on the board, the cell is empty. A refused move
    /// changes nothing. An accepted move always passes the turn, even the
    /// one that ends the match.
    #[instrument(skip(self), fields(room = %self.room, moves = self.moves))]
    pub fn play(&mut self, symbol: Symbol, point: Point) -> Result<bool, GameError> {
        if self.outcome.is_over() {
            warn!(outcome = ?self.outcome, "Move after game over");
            return Err(GameError::GameOver);
        }
        if symbol != self.turn {
            warn!(turn = %self.turn, "Move out of turn");
            return Err(GameError::NotYourTurn);
        }
        if !self.can_play_at(point)? {
            warn!("Point already occupied");
            return Err(GameError::PointOccupied);
        }

        self.board.set(point, symbol)?;
        self.moves += 1;

        if rules::is_winning_move(&self.board, self.moves, symbol, point) {
            self.outcome = Outcome::Won(symbol);
            info!(room = %self.room, winner = %symbol, moves = self.moves, "Game won");
        } else if self.moves == MAX_MOVES {
            self.outcome = Outcome::Tied;
            info!(room = %self.room, "Game tied");
        }
        self.turn = symbol.opponent();

        debug!(next = %self.turn, outcome = ?self.outcome, "Move applied");
        Ok(self.outcome.is_over())
    }

    /// Resets board, move count, outcome and turn; seats are kept.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotAllowed`] while the match is in progress.
    #[instrument(skip(self), fields(room = %self.room))]
    pub fn rematch(&mut self) -> Result<(), GameError> {
        if !self.outcome.is_over() {
            warn!("Rematch requested mid-game");
            return Err(GameError::NotAllowed);
        }
        self.board.clear();
        self.moves = 0;
        self.outcome = Outcome::InProgress;
        self.turn = Symbol::X;
        info!(room = %self.room, "Rematch started");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Views
    // ─────────────────────────────────────────────────────────────

    /// Winner and tie flag derived from the outcome.
    pub fn win_state(&self) -> WinState {
        WinState::new(self.outcome.winner(), self.outcome == Outcome::Tied)
    }

    /// Snapshot without a player symbol.
    pub fn state(&self) -> GameSnapshot {
        self.snapshot(None)
    }

    /// Snapshot carrying the symbol held by `connection`.
    pub fn state_for(&self, connection: ConnectionId) -> GameSnapshot {
        self.snapshot(self.symbol_of(connection))
    }

    fn snapshot(&self, symbol: Option<Symbol>) -> GameSnapshot {
        GameSnapshot::new(
            self.room.clone(),
            symbol,
            self.turn,
            self.board.clone(),
            self.win_state(),
        )
    }
}
