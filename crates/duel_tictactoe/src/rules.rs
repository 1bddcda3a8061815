//! Win detection around the last move.
//!
//! Only the lines through the cell that was just played can have become
//! complete, so the scan never looks at more than four lines.

use crate::board::Board;
use crate::point::{BOARD_SIZE, Point};
use crate::types::{Cell, Symbol};
use tracing::{instrument, trace};

/// Fewest placed symbols at which either player can hold a full line.
pub const MIN_MOVES_FOR_WIN: usize = 5;

/// Checks whether `symbol`, just placed at `point`, completed a line.
///
/// `moves` is the number of symbols on the board including this one.
#[instrument(skip(board))]
pub fn is_winning_move(board: &Board, moves: usize, symbol: Symbol, point: Point) -> bool {
    if moves < MIN_MOVES_FOR_WIN {
        return false;
    }

    let row = (0..BOARD_SIZE).all(|y| holds(board, symbol, Point::new(point.x, y)));
    if row {
        trace!(row = point.x, "Row complete");
        return true;
    }

    let column = (0..BOARD_SIZE).all(|x| holds(board, symbol, Point::new(x, point.y)));
    if column {
        trace!(column = point.y, "Column complete");
        return true;
    }

    if point.is_center() {
        diagonal_complete(board, symbol, Point::TOP_LEFT)
            || diagonal_complete(board, symbol, Point::TOP_RIGHT)
    } else if point.is_corner() {
        diagonal_complete(board, symbol, point)
    } else {
        false
    }
}

/// Walks from a corner through the center to the opposite corner.
fn diagonal_complete(board: &Board, symbol: Symbol, corner: Point) -> bool {
    let step = Point::CENTER - corner;
    let complete = std::iter::successors(Some(corner), |p| Some(*p + step))
        .take(BOARD_SIZE as usize)
        .all(|p| holds(board, symbol, p));
    if complete {
        trace!(%corner, "Diagonal complete");
    }
    complete
}

fn holds(board: &Board, symbol: Symbol, point: Point) -> bool {
    board.get(point).ok().and_then(Cell::symbol) == Some(symbol)
}
