//! Cards and the piles they are drawn from.
//!
//! ## Key Types
//!
//! - `CardId`: identifier of a physical card
//! - `Card`: resource ledger, pollution capacity and bound effects
//! - `CardSnapshot`: serializable card state
//! - `Pile`: shuffled deck with a face-up display

pub mod card;
pub mod pile;

pub use card::{Card, CardId, CardSnapshot};
pub use pile::{CardSource, Deck, Pile, PileSnapshot};
