//! Grid coordinates.
//!
//! A player's grid is a 5×5 window centred on the origin: rows and columns
//! both range over `-2..=2`. Positions outside the window are still valid
//! values; the grid simply refuses to hold cards there.

use serde::{Deserialize, Serialize};

/// Cell on a player's grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Largest absolute row or column inside the grid window.
    pub const GRID_RADIUS: i32 = 2;

    /// The starting card's cell.
    pub const ORIGIN: Position = Position { row: 0, col: 0 };

    /// Create a new position.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Check if this position lies inside the 5×5 window.
    #[must_use]
    pub const fn in_window(self) -> bool {
        self.row.unsigned_abs() <= Self::GRID_RADIUS as u32
            && self.col.unsigned_abs() <= Self::GRID_RADIUS as u32
    }

    /// Every position of the window, row-major.
    pub fn window() -> impl Iterator<Item = Position> {
        let r = Self::GRID_RADIUS;
        (-r..=r).flat_map(move |row| (-r..=r).map(move |col| Position::new(row, col)))
    }

    /// Check if `other` shares an edge with this position.
    #[must_use]
    pub const fn is_adjacent(self, other: Position) -> bool {
        matches!(
            (self.row.abs_diff(other.row), self.col.abs_diff(other.col)),
            (0, 1) | (1, 0)
        )
    }

    /// The four orthogonal neighbours (not clipped to the window).
    ///
    /// Coordinates saturate at the `i32` range.
    #[must_use]
    pub const fn neighbours(self) -> [Position; 4] {
        [
            Position::new(self.row.saturating_sub(1), self.col),
            Position::new(self.row.saturating_add(1), self.col),
            Position::new(self.row, self.col.saturating_sub(1)),
            Position::new(self.row, self.col.saturating_add(1)),
        ]
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
