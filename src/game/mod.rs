//! Turn engine: phases, player boards, and the `Game` state machine.

mod board;
mod engine;
mod phase;
mod snapshot;

pub use board::{GameSetup, PlayerBoard, PlayerSetup};
pub use engine::Game;
pub use phase::GamePhase;
pub use snapshot::GameSnapshot;
