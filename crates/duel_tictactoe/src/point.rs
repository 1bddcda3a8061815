//! Board coordinates and the vector arithmetic used by the diagonal scan.

use derive_more::{Add, Display, Neg, Sub};
use serde::{Deserialize, Serialize};

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: i32 = 3;

/// A cell coordinate. `x` is the row, `y` is the column.
///
/// Points are plain values; nothing stops a caller from building one off
/// the board, so every board access goes through [`Point::to_index`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Add, Sub, Neg, Display, Serialize, Deserialize,
)]
#[display("({x}, {y})")]
pub struct Point {
    /// Row, 0 at the top.
    pub x: i32,
    /// Column, 0 at the left.
    pub y: i32,
}

impl Point {
    /// Top-left corner.
    pub const TOP_LEFT: Point = Point::new(0, 0);
    /// Top-right corner.
    pub const TOP_RIGHT: Point = Point::new(0, 2);
    /// Bottom-left corner.
    pub const BOTTOM_LEFT: Point = Point::new(2, 0);
    /// Bottom-right corner.
    pub const BOTTOM_RIGHT: Point = Point::new(2, 2);
    /// Center cell, shared by both diagonals.
    pub const CENTER: Point = Point::new(1, 1);

    /// The four corners, each of which lies on exactly one diagonal.
    pub const CORNERS: [Point; 4] = [
        Point::TOP_LEFT,
        Point::TOP_RIGHT,
        Point::BOTTOM_LEFT,
        Point::BOTTOM_RIGHT,
    ];

    /// Creates a point from row and column.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when both coordinates are in `0..3`.
    pub fn is_on_board(self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }

    /// Converts to `(row, column)` array indices, or `None` when off the board.
    pub fn to_index(self) -> Option<(usize, usize)> {
        if self.is_on_board() {
            Some((self.x as usize, self.y as usize))
        } else {
            None
        }
    }

    /// True for the four corner cells.
    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }

    /// True for the center cell.
    pub fn is_center(self) -> bool {
        self == Self::CENTER
    }

    /// True when at least one diagonal runs through this cell.
    pub fn is_on_diagonal(self) -> bool {
        self.is_corner() || self.is_center()
    }

    /// Every cell on the board in row-major order.
    pub fn all() -> impl Iterator<Item = Point> {
        (0..BOARD_SIZE).flat_map(|x| (0..BOARD_SIZE).map(move |y| Point::new(x, y)))
    }
}
