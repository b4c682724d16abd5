//! Records of accepted turn actions.
//!
//! The game appends one `ActionRecord` per accepted operation. Rejected
//! operations leave no record, so the history replays the game exactly.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::position::Position;
use super::resource::Resource;
use crate::cards::{CardSource, Deck};

/// What an accepted operation did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionKind {
    TakeCard {
        source: CardSource,
        destination: Position,
    },
    Discard {
        deck: Deck,
    },
    Activate {
        position: Position,
        /// Set when another player's card assisted.
        assisted_by: Option<PlayerId>,
    },
    SelectReward {
        resource: Resource,
    },
    /// The player declined the remaining flagged activations.
    FinishActivation,
    FinishTurn,
    SelectPattern {
        index: usize,
    },
    SelectScoring {
        index: usize,
    },
}

/// An accepted action with its place in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who acted.
    pub player: PlayerId,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Position within the turn, starting at 0.
    pub sequence: u32,

    pub kind: ActionKind,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, turn: u32, sequence: u32, kind: ActionKind) -> Self {
        Self {
            player,
            turn,
            sequence,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_shape() {
        let record = ActionRecord::new(
            PlayerId::new(1),
            4,
            0,
            ActionKind::Activate {
                position: Position::new(0, 1),
                assisted_by: None,
            },
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["kind"]["action"], "activate");
        assert_eq!(value["kind"]["position"]["col"], 1);
        assert_eq!(value["turn"], 4);

        let back: ActionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }
}
