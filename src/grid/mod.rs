//! Player grids.
//!
//! - `Grid`: sparse 5×5 placement area with activation flags
//! - `ActivationPattern`: the final-round set of cells to activate

mod grid;
mod pattern;

pub use grid::{Grid, GridSnapshot, PlacedCard, MAX_SPAN};
pub use pattern::ActivationPattern;
