//! Validation and execution of card activations.
//!
//! Both processors follow the same two passes: a validation pass that reads
//! the grid and builds a [`LedgerPlan`], then, only if validation succeeded,
//! a mutation pass that applies the plan. A refused transaction leaves the
//! grid exactly as it was.
//!
//! - [`DirectActionProcessor`]: the grid owner activates a card alone
//! - [`AssistedActionProcessor`]: another player's card drives the exchange
//!   and earns a reward

mod assisted;
mod direct;
mod plan;
mod rejection;
mod transaction;

pub use assisted::AssistedActionProcessor;
pub use direct::DirectActionProcessor;
pub use plan::LedgerPlan;
pub use rejection::Rejection;
pub use transaction::{Placement, Transaction};
