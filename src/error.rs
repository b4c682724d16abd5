//! Error types.
//!
//! Rule violations (an activation the effects do not allow, a placement on
//! an occupied cell) are not errors: processors and turn operations answer
//! them with `false`. The types here cover broken preconditions and bad
//! input data, which callers must handle separately.

use crate::cards::CardId;
use crate::core::{PlayerId, Position, Resource};

/// A card ledger was asked to do something its guard would have refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The card does not hold the resources being taken.
    #[error("card {card} holds {held} {resource}, cannot take {requested}")]
    InsufficientResources {
        /// Card being debited.
        card: CardId,
        /// First resource that fell short.
        resource: Resource,
        /// Units held.
        held: u32,
        /// Units requested.
        requested: u32,
    },

    /// Receiving would push the pollution count past the card's capacity.
    #[error("card {card} would hold {attempted} pollution, limit is {limit}")]
    PollutionLimitExceeded {
        /// Card being credited.
        card: CardId,
        /// Pollution count after the credit.
        attempted: u32,
        /// Capacity of the card.
        limit: u32,
    },
}

/// Structural grid violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("position {0} is outside the grid")]
    OutOfBounds(Position),

    #[error("position {0} already holds a card")]
    Occupied(Position),

    #[error("card {0} is already on the grid")]
    DuplicateCard(CardId),
}

/// Reward selection outside its protocol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewardError {
    #[error("no reward is pending")]
    NothingPending,

    #[error("{0} is not among the offered rewards")]
    NotOffered(Resource),
}

/// Invalid game configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("player count must be between 2 and 5, got {0}")]
    PlayerCount(usize),

    #[error("turns per player must be positive")]
    ZeroTurns,

    #[error("piles must show at least one card")]
    ZeroVisibleCards,

    #[error("setup lists {given} players, config expects {expected}")]
    SetupMismatch {
        /// Players in the config.
        expected: usize,
        /// Players in the setup.
        given: usize,
    },

    #[error("starting card rejected: {0}")]
    StartingCard(#[from] GridError),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Snapshot decoding or validation failure.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot of card {card} holds {count} pollution over limit {limit}")]
    PollutionOverLimit {
        /// Card described by the snapshot.
        card: CardId,
        /// Pollution recorded.
        count: u32,
        /// Capacity recorded.
        limit: u32,
    },

    #[error("snapshot of card {card} reports {recorded} pollution but holds {held}")]
    PollutionMismatch {
        /// Card described by the snapshot.
        card: CardId,
        /// `pollutionCount` field.
        recorded: u32,
        /// POLLUTION entries in `resources`.
        held: u32,
    },
}

/// Errors surfaced by turn-engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Reward(#[from] RewardError),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
}
