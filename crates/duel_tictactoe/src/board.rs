//! The 3x3 grid.

use crate::error::GameError;
use crate::point::Point;
use crate::types::{Cell, Symbol};
use serde::{Deserialize, Serialize};

/// 3x3 tic-tac-toe board, indexed by `(row, column)`.
///
/// Serialized as nested arrays, one inner array per row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Cell; 3]; 3],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell at `point`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPoint`] when `point` is off the board.
    pub fn get(&self, point: Point) -> Result<Cell, GameError> {
        let (row, col) = point.to_index().ok_or(GameError::InvalidPoint)?;
        Ok(self.cells[row][col])
    }

    /// Places `symbol` at `point`, overwriting whatever is there.
    pub(crate) fn set(&mut self, point: Point, symbol: Symbol) -> Result<(), GameError> {
        let (row, col) = point.to_index().ok_or(GameError::InvalidPoint)?;
        self.cells[row][col] = symbol.into();
        Ok(())
    }

    /// True when the cell at `point` is empty.
    pub fn is_empty_at(&self, point: Point) -> Result<bool, GameError> {
        self.get(point).map(Cell::is_empty)
    }

    /// Number of non-empty cells.
    pub fn filled(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// True when every cell holds a symbol.
    pub fn is_full(&self) -> bool {
        self.filled() == 9
    }

    /// Rows in top-to-bottom order.
    pub fn rows(&self) -> &[[Cell; 3]; 3] {
        &self.cells
    }

    /// Clears every cell.
    pub(crate) fn clear(&mut self) {
        self.cells = Default::default();
    }

    /// Formats the board as a human-readable grid, `.` for empty cells.
    pub fn display(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Empty => ".",
                        Cell::X => "X",
                        Cell::O => "O",
                    })
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join("\n-+-+-\n")
    }
}
