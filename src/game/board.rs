//! Per-player state and setup data.

use crate::cards::Card;
use crate::core::PlayerId;
use crate::grid::{ActivationPattern, Grid};
use crate::scoring::ScoringMethod;

/// What one player starts the game with.
#[derive(Clone, Debug)]
pub struct PlayerSetup {
    /// Placed at the origin before the first turn.
    pub starting_card: Card,
    pub activation_patterns: Vec<ActivationPattern>,
    pub scoring_methods: Vec<ScoringMethod>,
}

impl PlayerSetup {
    #[must_use]
    pub fn new(starting_card: Card) -> Self {
        Self {
            starting_card,
            activation_patterns: Vec::new(),
            scoring_methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: ActivationPattern) -> Self {
        self.activation_patterns.push(pattern);
        self
    }

    #[must_use]
    pub fn with_scoring(mut self, method: ScoringMethod) -> Self {
        self.scoring_methods.push(method);
        self
    }
}

/// Everything needed to start a game besides its config.
#[derive(Clone, Debug, Default)]
pub struct GameSetup {
    /// One entry per seat, in seat order.
    pub players: Vec<PlayerSetup>,
    pub deck_i: Vec<Card>,
    pub deck_ii: Vec<Card>,
}

/// A player's grid together with their end-game cards.
#[derive(Clone, Debug)]
pub struct PlayerBoard {
    pub(crate) grid: Grid,
    pub(crate) patterns: Vec<ActivationPattern>,
    pub(crate) scoring: Vec<ScoringMethod>,
    pub(crate) selected_pattern: Option<usize>,
    pub(crate) selected_scoring: Option<usize>,
}

impl PlayerBoard {
    pub(crate) fn new(owner: PlayerId, setup: PlayerSetup) -> Self {
        Self {
            grid: Grid::new(owner),
            patterns: setup.activation_patterns,
            scoring: setup.scoring_methods,
            selected_pattern: None,
            selected_scoring: None,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn activation_patterns(&self) -> &[ActivationPattern] {
        &self.patterns
    }

    #[must_use]
    pub fn scoring_methods(&self) -> &[ScoringMethod] {
        &self.scoring
    }

    /// The scoring card chosen at the end of the game.
    #[must_use]
    pub fn selected_scoring(&self) -> Option<&ScoringMethod> {
        self.selected_scoring.and_then(|i| self.scoring.get(i))
    }
}
