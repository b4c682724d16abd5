//! Activation patterns for the final turn.
//!
//! At the end of the game each player picks one of their pattern cards;
//! the pattern lists the grid cells that may be activated one last time.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::core::Position;

/// Cells to activate in the final round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationPattern {
    positions: Vec<Position>,
    selected: bool,
}

impl ActivationPattern {
    #[must_use]
    pub fn new(positions: impl IntoIterator<Item = Position>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
            selected: false,
        }
    }

    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Choose this pattern and flag its cells on `grid`.
    ///
    /// Returns the cells actually flagged; empty cells are skipped. A pattern
    /// can only be chosen once.
    pub fn select(&mut self, grid: &mut Grid) -> Option<Vec<Position>> {
        if self.selected {
            return None;
        }
        self.selected = true;
        grid.set_activation_pattern(&self.positions);
        Some(
            self.positions
                .iter()
                .copied()
                .filter(|&p| grid.is_activatable(p))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId};
    use crate::core::PlayerId;

    #[test]
    fn test_select_flags_occupied_cells() {
        let mut grid = Grid::new(PlayerId::new(0));
        grid.put_card(Position::ORIGIN, Card::new(CardId::new(0), 1)).unwrap();
        grid.put_card(Position::new(0, 1), Card::new(CardId::new(1), 1)).unwrap();

        let mut pattern = ActivationPattern::new([
            Position::ORIGIN,
            Position::new(1, 1),
            Position::new(0, 1),
        ]);

        let flagged = pattern.select(&mut grid).unwrap();
        assert_eq!(flagged, vec![Position::ORIGIN, Position::new(0, 1)]);
        assert!(pattern.is_selected());
        assert!(pattern.select(&mut grid).is_none());
    }
}
