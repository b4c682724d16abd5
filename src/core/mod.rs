//! Core value types: resources, positions, players, actions, RNG, configuration.
//!
//! Nothing here knows about cards or effects; every other module builds on
//! these.

pub mod action;
pub mod config;
pub mod player;
pub mod position;
pub mod resource;
pub mod rng;

pub use action::{ActionKind, ActionRecord};
pub use config::GameConfig;
pub use player::{PlayerId, PlayerMap};
pub use position::Position;
pub use resource::{Resource, ResourceBag};
pub use rng::GameRng;
