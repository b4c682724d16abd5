//! # terra-futura
//!
//! Action validation and execution engine for a card-placement economy game.
//!
//! Players place cards on a personal 5×5 grid. Each card holds a ledger of
//! resources and carries production effects that turn resources into other
//! resources, usually emitting pollution that the grid's cards must absorb
//! within their capacity. Another player may assist an activation through
//! one of their own cards and is rewarded for it.
//!
//! ## Design Principles
//!
//! 1. **Validate, then mutate**: every activation is checked in full against
//!    the grid before a single resource moves. A refused activation leaves
//!    no trace.
//!
//! 2. **Rules answer, contracts fail**: a move the rules forbid returns
//!    `false`; only broken preconditions surface as typed errors.
//!
//! 3. **Closed vocabularies**: resources, effects, phases and reward modes
//!    are enums matched exhaustively.
//!
//! ## Modules
//!
//! - `core`: resources, positions, players, action records, RNG, config
//! - `effects`: production effects and their JSON records
//! - `cards`: card ledgers and the draw piles
//! - `grid`: per-player placement grid and activation patterns
//! - `actions`: direct and assisted activation processors
//! - `reward`: reward offers for assisting players
//! - `scoring`: end-of-game scoring cards
//! - `observer`: state fan-out to front ends
//! - `game`: the turn engine

pub mod actions;
pub mod cards;
pub mod core;
pub mod effects;
pub mod error;
pub mod game;
pub mod grid;
pub mod observer;
pub mod reward;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    ActionKind, ActionRecord, GameConfig, GameRng, PlayerId, PlayerMap, Position, Resource,
    ResourceBag,
};

pub use crate::effects::{Effect, EffectRecord};

pub use crate::cards::{Card, CardId, CardSnapshot, CardSource, Deck, Pile};

pub use crate::grid::{ActivationPattern, Grid, GridSnapshot};

pub use crate::actions::{
    AssistedActionProcessor, DirectActionProcessor, LedgerPlan, Placement, Rejection, Transaction,
};

pub use crate::reward::{ChosenReward, PendingReward, RewardMode, RewardSelector, SelectReward};

pub use crate::scoring::{Points, ScoringMethod};

pub use crate::observer::{GameObserver, ObserverRegistry};

pub use crate::game::{Game, GamePhase, GameSetup, GameSnapshot, PlayerBoard, PlayerSetup};

pub use crate::error::{
    ConfigError, EngineError, GridError, LedgerError, RewardError, SnapshotError,
};
