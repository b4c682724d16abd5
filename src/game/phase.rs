//! Turn phases.

use serde::{Deserialize, Serialize};

/// Where the game stands within the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// The player on turn must take a card and may first discard one.
    TakeCardNoCardDiscarded,
    /// A card was discarded this turn; the player must take one.
    TakeCardCardDiscarded,
    /// Flagged cards may be activated.
    ActivateCard,
    /// An assisting player owes a reward choice.
    SelectReward,
    /// Final round: the player on turn picks an activation pattern.
    SelectActivationPattern,
    /// Final scoring: the player on turn picks a scoring card.
    SelectScoringMethod,
    Finish,
}

impl GamePhase {
    /// Check if a card may be taken from a pile in this phase.
    #[must_use]
    pub const fn is_take_card(self) -> bool {
        matches!(
            self,
            GamePhase::TakeCardNoCardDiscarded | GamePhase::TakeCardCardDiscarded
        )
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GamePhase::TakeCardNoCardDiscarded => "take_card_no_card_discarded",
            GamePhase::TakeCardCardDiscarded => "take_card_card_discarded",
            GamePhase::ActivateCard => "activate_card",
            GamePhase::SelectReward => "select_reward",
            GamePhase::SelectActivationPattern => "select_activation_pattern",
            GamePhase::SelectScoringMethod => "select_scoring_method",
            GamePhase::Finish => "finish",
        };
        f.write_str(name)
    }
}
