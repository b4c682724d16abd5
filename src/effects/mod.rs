//! Production effects bound to cards.
//!
//! - `Effect`: closed set of predicates over an exchange
//! - `EffectRecord`: the JSON form used by snapshots and card definitions
//!
//! Effects only answer whether an exchange is allowed. Moving resources is
//! the job of the action processors in [`crate::actions`].

mod effect;
mod record;

pub use effect::Effect;
pub use record::EffectRecord;
