//! Serialized game state sent to observers.

use serde::{Deserialize, Serialize};

use super::phase::GamePhase;
use crate::cards::{Deck, PileSnapshot};
use crate::core::PlayerId;
use crate::grid::GridSnapshot;
use crate::reward::RewardSnapshot;
use crate::scoring::ScoringSnapshot;

/// The game as seen by one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// The player this snapshot is addressed to.
    pub viewer: PlayerId,
    pub phase: GamePhase,
    pub current_player: PlayerId,
    pub turn: u32,
    pub grids: Vec<GridSnapshot>,
    pub piles: Vec<(Deck, PileSnapshot)>,
    pub reward: RewardSnapshot,
    /// The viewer's own scoring cards.
    pub scoring: Vec<ScoringSnapshot>,
}
