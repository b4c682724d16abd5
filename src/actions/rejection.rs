//! Reasons an activation is refused.

use crate::cards::CardId;
use crate::core::Position;

/// Why a processor refused a transaction.
///
/// Rejections are ordinary outcomes, reported by the processors' `check`
/// methods and logged at debug level by `activate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("card {0} is not on the grid")]
    CardNotOnGrid(CardId),

    #[error("card at {0} is not activatable")]
    NotActivatable(Position),

    #[error("exchange matches no effect of the card")]
    EffectMismatch,

    #[error("output directed to {0} instead of the activated card")]
    OutputElsewhere(Position),

    #[error("no card at input source {0}")]
    MissingSource(Position),

    #[error("input source {0} is not activatable")]
    SourceNotActivatable(Position),

    #[error("card at {0} lacks the requested inputs")]
    InsufficientSource(Position),

    #[error("no card at pollution target {0}")]
    MissingPollutionTarget(Position),

    #[error("pollution target {0} is not activatable")]
    PollutionTargetNotActivatable(Position),

    #[error("card at {0} would exceed its pollution capacity")]
    CapacityExceeded(Position),

    #[error("assisting player or card missing")]
    NoAssistant,

    #[error("a player cannot assist their own activation")]
    SelfAssist,

    #[error("card {0} cannot be assisted")]
    NotAssistable(CardId),

    #[error("exchange does not match the assisting card")]
    AssistingEffectMismatch,

    #[error("pollution transfer needs exactly one target, got {0}")]
    TransferCardinality(usize),

    #[error("pollution transfer needs a card at the origin")]
    NoOrigin,

    #[error("card at {0} holds no pollution to transfer")]
    NothingToTransfer(Position),

    #[error("assistance would earn no reward")]
    EmptyReward,

    #[error("assisting card {0} cannot hold any offered reward")]
    RewardUnplaceable(CardId),
}
