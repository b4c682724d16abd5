//! Rewards owed to assisting players.
//!
//! A successful assisted activation hands the assisting player a reward:
//! they later pick one resource from the offer and it lands on their
//! assisting card. The processor only announces the offer through
//! [`RewardSelector::set_reward`]; resolving it is up to the selector and
//! the turn engine.
//!
//! ## Modes
//!
//! - [`RewardMode::Assistance`]: the offer is the resources the activating
//!   player paid
//! - [`RewardMode::Pollution`]: the assistant moved a pollution unit off the
//!   activating grid and is offered that pollution
//!
//! ```
//! use terra_futura::cards::CardId;
//! use terra_futura::core::{PlayerId, Resource};
//! use terra_futura::reward::{RewardMode, RewardSelector, SelectReward};
//!
//! let mut selector = SelectReward::new();
//! selector.set_reward(
//!     PlayerId::new(1),
//!     CardId::new(4),
//!     vec![Resource::Red, Resource::Green],
//!     RewardMode::Assistance,
//! );
//!
//! assert!(selector.can_select(Resource::Green));
//! let chosen = selector.select(Resource::Green).unwrap();
//! assert_eq!(chosen.card, CardId::new(4));
//! assert!(!selector.can_select(Resource::Red));
//! ```

mod select;

pub use select::SelectReward;

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{PlayerId, Resource};
use crate::error::RewardError;

/// Why a reward is owed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardMode {
    Assistance,
    Pollution,
}

impl std::fmt::Display for RewardMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RewardMode::Assistance => f.write_str("assistance"),
            RewardMode::Pollution => f.write_str("pollution"),
        }
    }
}

/// An outstanding offer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReward {
    /// The assisting player.
    pub player: PlayerId,
    /// The assisting card the chosen resource goes to.
    pub card: CardId,
    pub offered: Vec<Resource>,
    pub mode: RewardMode,
}

/// A resolved offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChosenReward {
    pub player: PlayerId,
    pub card: CardId,
    pub resource: Resource,
    pub mode: RewardMode,
}

/// Serializable selector state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSnapshot {
    pub pending: Option<PendingReward>,
}

/// Receives reward offers from the assisted action processor.
///
/// `set_reward` is fire-and-forget: the processor has already mutated the
/// grid when it calls it and does not look at the selector afterwards.
pub trait RewardSelector {
    /// Record an offer for `player`, replacing any earlier one.
    fn set_reward(&mut self, player: PlayerId, card: CardId, reward: Vec<Resource>, mode: RewardMode);

    /// Check if `resource` is part of the current offer.
    fn can_select(&self, resource: Resource) -> bool;

    /// Resolve the offer by choosing `resource`.
    fn select(&mut self, resource: Resource) -> Result<ChosenReward, RewardError>;

    /// Serializable view of the selector.
    fn snapshot(&self) -> RewardSnapshot;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serialization() {
        assert_eq!(serde_json::to_string(&RewardMode::Pollution).unwrap(), r#""pollution""#);
        assert_eq!(RewardMode::Assistance.to_string(), "assistance");
    }
}
