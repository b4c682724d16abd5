//! Proposed activations.
//!
//! A `Transaction` names the card to activate and lists every resource
//! movement it implies: inputs with the cell they come from, outputs with
//! the cell they go to, and one pollution target per emitted unit.
//!
//! ```
//! use terra_futura::actions::Transaction;
//! use terra_futura::cards::CardId;
//! use terra_futura::core::{Position, Resource};
//!
//! let tx = Transaction::new(CardId::new(3))
//!     .input(Resource::Red, Position::new(0, 1))
//!     .input(Resource::Green, Position::new(0, 1))
//!     .output(Resource::Car, Position::new(0, 0))
//!     .pollute(Position::new(1, 0));
//!
//! assert_eq!(tx.pollution_count(), 1);
//! assert_eq!(tx.input_resources().total(), 2);
//! assert_eq!(tx.inputs_by_source().len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::core::{Position, Resource, ResourceBag};

/// A resource and the cell it moves from or to.
pub type Placement = (Resource, Position);

/// A proposed activation of one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Card being activated.
    pub card: CardId,
    pub inputs: SmallVec<[Placement; 4]>,
    pub outputs: SmallVec<[Placement; 4]>,
    /// One entry per pollution unit emitted.
    pub pollution: SmallVec<[Position; 2]>,
}

impl Transaction {
    /// Start an empty transaction for `card`.
    #[must_use]
    pub fn new(card: CardId) -> Self {
        Self {
            card,
            inputs: SmallVec::new(),
            outputs: SmallVec::new(),
            pollution: SmallVec::new(),
        }
    }

    /// Build a transaction from caller-supplied lists.
    #[must_use]
    pub fn from_parts(
        card: CardId,
        inputs: &[Placement],
        outputs: &[Placement],
        pollution: &[Position],
    ) -> Self {
        Self {
            card,
            inputs: SmallVec::from_slice(inputs),
            outputs: SmallVec::from_slice(outputs),
            pollution: SmallVec::from_slice(pollution),
        }
    }

    /// Pay `resource` from the card at `source`.
    #[must_use]
    pub fn input(mut self, resource: Resource, source: Position) -> Self {
        self.inputs.push((resource, source));
        self
    }

    /// Produce `resource` onto the card at `destination`.
    #[must_use]
    pub fn output(mut self, resource: Resource, destination: Position) -> Self {
        self.outputs.push((resource, destination));
        self
    }

    /// Emit one pollution unit onto the card at `target`.
    #[must_use]
    pub fn pollute(mut self, target: Position) -> Self {
        self.pollution.push(target);
        self
    }

    /// Every input resource, ignoring sources.
    #[must_use]
    pub fn input_resources(&self) -> ResourceBag {
        self.inputs.iter().map(|&(r, _)| r).collect()
    }

    /// Every output resource, ignoring destinations.
    #[must_use]
    pub fn output_resources(&self) -> ResourceBag {
        self.outputs.iter().map(|&(r, _)| r).collect()
    }

    #[must_use]
    pub fn pollution_count(&self) -> u32 {
        self.pollution.len() as u32
    }

    /// Inputs grouped by source cell, ordered by position.
    #[must_use]
    pub fn inputs_by_source(&self) -> Vec<(Position, ResourceBag)> {
        let mut groups: Vec<(Position, ResourceBag)> = Vec::new();
        for &(resource, source) in &self.inputs {
            match groups.iter_mut().find(|(p, _)| *p == source) {
                Some((_, bag)) => bag.add(resource, 1),
                None => groups.push((source, ResourceBag::from([resource]))),
            }
        }
        groups.sort_unstable_by_key(|&(p, _)| p);
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Resource::*;

    #[test]
    fn test_grouping() {
        let a = Position::new(0, 1);
        let b = Position::new(-1, 0);
        let tx = Transaction::new(CardId::new(1))
            .input(Red, a)
            .input(Green, b)
            .input(Red, a);

        assert_eq!(
            tx.inputs_by_source(),
            vec![
                (b, ResourceBag::from([Green])),
                (a, ResourceBag::from([Red, Red])),
            ]
        );
        assert_eq!(tx.input_resources(), ResourceBag::from([Red, Red, Green]));
    }

    #[test]
    fn test_from_parts() {
        let tx = Transaction::from_parts(
            CardId::new(2),
            &[(Red, Position::ORIGIN)],
            &[(Car, Position::ORIGIN)],
            &[Position::ORIGIN, Position::ORIGIN],
        );

        assert_eq!(tx.output_resources(), ResourceBag::from([Car]));
        assert_eq!(tx.pollution_count(), 2);
    }
}
