//! A player's grid of placed cards.
//!
//! The grid is a sparse map from [`Position`] to [`Card`] bounded to the
//! 5×5 window around the origin. Placed cards never move. Alongside the
//! cards it tracks activation eligibility for the current turn:
//!
//! - *activatable*: granted by the turn engine after a placement or when an
//!   activation pattern is chosen
//! - *activated*: consumed by a successful activation; a card in this set
//!   cannot be made activatable again until [`Grid::clear_activation_flags`]
//!
//! ## Placement rules
//!
//! [`Grid::can_put_card`] is the game rule: inside the window, unoccupied,
//! touching an existing card edge to edge (unless the grid is empty), and
//! the occupied rows and columns never spanning more than three.
//! [`Grid::put_card`] only enforces structure, so setup can place the
//! starting card directly.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CardSnapshot};
use crate::core::{PlayerId, Position, ResourceBag};
use crate::error::GridError;

/// Largest number of distinct rows (or columns) a grid may occupy.
pub const MAX_SPAN: i32 = 3;

/// A player's placed cards and their activation flags.
#[derive(Clone, Debug)]
pub struct Grid {
    owner: PlayerId,
    cards: FxHashMap<Position, Card>,
    positions: FxHashMap<CardId, Position>,
    activatable: FxHashSet<Position>,
    activated: FxHashSet<Position>,
}

impl Grid {
    /// Create an empty grid for `owner`.
    #[must_use]
    pub fn new(owner: PlayerId) -> Self {
        Self {
            owner,
            cards: FxHashMap::default(),
            positions: FxHashMap::default(),
            activatable: FxHashSet::default(),
            activated: FxHashSet::default(),
        }
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Number of placed cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn card_at(&self, position: Position) -> Option<&Card> {
        self.cards.get(&position)
    }

    pub fn card_at_mut(&mut self, position: Position) -> Option<&mut Card> {
        self.cards.get_mut(&position)
    }

    /// Where `card` sits, if it is on this grid.
    #[must_use]
    pub fn position_of(&self, card: CardId) -> Option<Position> {
        self.positions.get(&card).copied()
    }

    /// Look a card up by ID.
    #[must_use]
    pub fn card(&self, card: CardId) -> Option<&Card> {
        self.position_of(card).and_then(|p| self.cards.get(&p))
    }

    /// Placed cards ordered by position.
    pub fn cards(&self) -> impl Iterator<Item = (Position, &Card)> {
        let mut placed: Vec<_> = self.cards.iter().map(|(&p, c)| (p, c)).collect();
        placed.sort_unstable_by_key(|&(p, _)| p);
        placed.into_iter()
    }

    /// Check if a card may be placed at `position` under the game rules.
    #[must_use]
    pub fn can_put_card(&self, position: Position) -> bool {
        if !position.in_window() || self.cards.contains_key(&position) {
            return false;
        }
        if self.cards.is_empty() {
            return true;
        }
        if !position
            .neighbours()
            .iter()
            .any(|n| self.cards.contains_key(n))
        {
            return false;
        }

        let (mut min_row, mut max_row) = (position.row, position.row);
        let (mut min_col, mut max_col) = (position.col, position.col);
        for p in self.cards.keys() {
            min_row = min_row.min(p.row);
            max_row = max_row.max(p.row);
            min_col = min_col.min(p.col);
            max_col = max_col.max(p.col);
        }
        max_row - min_row < MAX_SPAN && max_col - min_col < MAX_SPAN
    }

    /// Place `card` at `position`.
    ///
    /// Checks only the window, occupancy and ID uniqueness; callers apply
    /// [`Grid::can_put_card`] first when the game rules matter.
    pub fn put_card(&mut self, position: Position, card: Card) -> Result<(), GridError> {
        if !position.in_window() {
            return Err(GridError::OutOfBounds(position));
        }
        if self.cards.contains_key(&position) {
            return Err(GridError::Occupied(position));
        }
        if self.positions.contains_key(&card.id()) {
            return Err(GridError::DuplicateCard(card.id()));
        }

        self.positions.insert(card.id(), position);
        self.cards.insert(position, card);
        Ok(())
    }

    /// Check if the card at `position` may be activated now.
    #[must_use]
    pub fn is_activatable(&self, position: Position) -> bool {
        self.cards.contains_key(&position) && self.activatable.contains(&position)
    }

    /// Check if the card at `position` was already activated this turn.
    #[must_use]
    pub fn was_activated(&self, position: Position) -> bool {
        self.activated.contains(&position)
    }

    /// Grant the activation flag to the card at `position`.
    ///
    /// Returns `false` if there is no card or it was already activated.
    pub fn set_activatable(&mut self, position: Position) -> bool {
        if !self.cards.contains_key(&position) || self.activated.contains(&position) {
            return false;
        }
        self.activatable.insert(position);
        true
    }

    /// Grant the activation flag to every card of `positions`.
    ///
    /// Empty or already activated cells are skipped. Returns the number of
    /// cards flagged.
    pub fn set_activation_pattern(&mut self, positions: &[Position]) -> usize {
        positions
            .iter()
            .filter(|&&p| self.set_activatable(p))
            .count()
    }

    /// Consume the activation flag of `position`.
    pub fn mark_activated(&mut self, position: Position) {
        self.activatable.remove(&position);
        self.activated.insert(position);
    }

    /// Positions still holding an activation flag, ordered.
    #[must_use]
    pub fn activatable_positions(&self) -> Vec<Position> {
        let mut flagged: Vec<_> = self.activatable.iter().copied().collect();
        flagged.sort_unstable();
        flagged
    }

    /// Drop every activation flag at the end of a turn.
    pub fn clear_activation_flags(&mut self) {
        self.activatable.clear();
        self.activated.clear();
    }

    /// Occupied positions sharing the row or the column of `position`.
    ///
    /// Includes `position` itself when occupied.
    #[must_use]
    pub fn row_and_column(&self, position: Position) -> Vec<Position> {
        let mut line: Vec<_> = self
            .cards
            .keys()
            .filter(|p| p.row == position.row || p.col == position.col)
            .copied()
            .collect();
        line.sort_unstable();
        line
    }

    /// Sum of every card's ledger.
    #[must_use]
    pub fn resources(&self) -> ResourceBag {
        let mut total = ResourceBag::new();
        for card in self.cards.values() {
            total.add_bag(card.resources());
        }
        total
    }

    /// Serializable view, ordered by position.
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            owner: self.owner,
            cards: self
                .cards()
                .map(|(position, card)| PlacedCard {
                    position,
                    activatable: self.is_activatable(position),
                    card: card.snapshot(),
                })
                .collect(),
        }
    }
}

/// Serializable grid state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub owner: PlayerId,
    pub cards: Vec<PlacedCard>,
}

impl GridSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// One card of a [`GridSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedCard {
    pub position: Position,
    pub activatable: bool,
    pub card: CardSnapshot,
}
