//! Seat assignment by join order.

use crate::error::GameError;
use crate::types::{ConnectionId, Symbol};
use tracing::{debug, instrument, warn};

/// Seats per match.
pub const MAX_PLAYERS: usize = 2;

/// Ordered `(connection, symbol)` pairs, first joiner first.
///
/// The order is part of the contract: the second joiner is given the
/// opposite of whatever the sole remaining seat holds, so lookups go
/// through [`Roster::first`] rather than map iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    seats: Vec<(ConnectionId, Symbol)>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seats `connection`, returning its symbol.
    ///
    /// Re-seating an already seated connection returns its existing symbol.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::RoomFull`] when both seats belong to other connections.
    #[instrument(skip(self), fields(seated = self.seats.len()))]
    pub fn assign(&mut self, connection: ConnectionId) -> Result<Symbol, GameError> {
        if let Some(symbol) = self.symbol_of(connection) {
            debug!(%symbol, "Connection already seated");
            return Ok(symbol);
        }

        let symbol = match self.seats.as_slice() {
            [] => Symbol::X,
            [(_, sole)] => sole.opponent(),
            _ => {
                warn!("Both seats taken");
                return Err(GameError::RoomFull);
            }
        };

        self.seats.push((connection, symbol));
        debug!(%symbol, "Seat assigned");
        Ok(symbol)
    }

    /// Frees the seat held by `connection`, returning the symbol it held.
    #[instrument(skip(self))]
    pub fn release(&mut self, connection: ConnectionId) -> Option<Symbol> {
        let index = self.seats.iter().position(|(id, _)| *id == connection)?;
        let (_, symbol) = self.seats.remove(index);
        debug!(%symbol, "Seat released");
        Some(symbol)
    }

    /// The symbol held by `connection`, if seated.
    pub fn symbol_of(&self, connection: ConnectionId) -> Option<Symbol> {
        self.seats
            .iter()
            .find(|(id, _)| *id == connection)
            .map(|(_, symbol)| *symbol)
    }

    /// The connection holding `symbol`, if any.
    pub fn connection_of(&self, symbol: Symbol) -> Option<ConnectionId> {
        self.seats
            .iter()
            .find(|(_, held)| *held == symbol)
            .map(|(id, _)| *id)
    }

    /// The earliest seat still occupied.
    pub fn first(&self) -> Option<(ConnectionId, Symbol)> {
        self.seats.first().copied()
    }

    /// Seats in join order.
    pub fn iter(&self) -> impl Iterator<Item = (ConnectionId, Symbol)> + '_ {
        self.seats.iter().copied()
    }

    /// Number of occupied seats.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// True when nobody is seated.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// True when both seats are occupied.
    pub fn is_full(&self) -> bool {
        self.seats.len() >= MAX_PLAYERS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ConnectionId = ConnectionId::new(1);
    const B: ConnectionId = ConnectionId::new(2);
    const C: ConnectionId = ConnectionId::new(3);

    #[test]
    fn test_join_order_decides_symbols() {
        let mut roster = Roster::new();
        assert_eq!(roster.assign(A), Ok(Symbol::X));
        assert_eq!(roster.assign(B), Ok(Symbol::O));
        assert_eq!(roster.first(), Some((A, Symbol::X)));
        assert!(roster.is_full());
    }

    #[test]
    fn test_assign_is_idempotent() {
        let mut roster = Roster::new();
        roster.assign(A).unwrap();
        roster.assign(B).unwrap();
        assert_eq!(roster.assign(B), Ok(Symbol::O));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_third_connection_rejected() {
        let mut roster = Roster::new();
        roster.assign(A).unwrap();
        roster.assign(B).unwrap();
        assert_eq!(roster.assign(C), Err(GameError::RoomFull));
        assert_eq!(roster.symbol_of(C), None);
    }

    #[test]
    fn test_freed_seat_gets_opposite_of_remaining() {
        let mut roster = Roster::new();
        roster.assign(A).unwrap();
        roster.assign(B).unwrap();
        assert_eq!(roster.release(A), Some(Symbol::X));
        assert_eq!(roster.first(), Some((B, Symbol::O)));
        assert_eq!(roster.assign(C), Ok(Symbol::X));
        assert_eq!(roster.connection_of(Symbol::X), Some(C));
    }

    #[test]
    fn test_release_unknown_is_noop() {
        let mut roster = Roster::new();
        roster.assign(A).unwrap();
        assert_eq!(roster.release(B), None);
        assert_eq!(roster.len(), 1);
    }
}
