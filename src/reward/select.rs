//! The game's reward selector.

use tracing::info;

use super::{ChosenReward, PendingReward, RewardMode, RewardSelector, RewardSnapshot};
use crate::cards::CardId;
use crate::core::{PlayerId, Resource};
use crate::error::RewardError;

/// Holds at most one pending offer.
#[derive(Clone, Debug, Default)]
pub struct SelectReward {
    pending: Option<PendingReward>,
}

impl SelectReward {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingReward> {
        self.pending.as_ref()
    }

    /// The player owed the pending reward.
    #[must_use]
    pub fn pending_player(&self) -> Option<PlayerId> {
        self.pending.as_ref().map(|p| p.player)
    }
}

impl RewardSelector for SelectReward {
    fn set_reward(&mut self, player: PlayerId, card: CardId, reward: Vec<Resource>, mode: RewardMode) {
        info!(%player, %card, %mode, offered = reward.len(), "Reward offered");
        self.pending = Some(PendingReward {
            player,
            card,
            offered: reward,
            mode,
        });
    }

    fn can_select(&self, resource: Resource) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| p.offered.contains(&resource))
    }

    fn select(&mut self, resource: Resource) -> Result<ChosenReward, RewardError> {
        let pending = self.pending.as_ref().ok_or(RewardError::NothingPending)?;
        if !pending.offered.contains(&resource) {
            return Err(RewardError::NotOffered(resource));
        }

        let chosen = ChosenReward {
            player: pending.player,
            card: pending.card,
            resource,
            mode: pending.mode,
        };
        self.pending = None;
        Ok(chosen)
    }

    fn snapshot(&self) -> RewardSnapshot {
        RewardSnapshot {
            pending: self.pending.clone(),
        }
    }
}
