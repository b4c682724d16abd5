//! Net ledger changes of a validated transaction.
//!
//! Validation builds a `LedgerPlan` listing, per cell, what leaves and what
//! arrives. The plan is checked against the grid as a whole before anything
//! moves, so a transaction either applies completely or not at all.

use rustc_hash::FxHashMap;

use crate::core::{Position, ResourceBag};
use crate::error::LedgerError;
use crate::grid::Grid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Leg {
    debit: ResourceBag,
    credit: ResourceBag,
}

/// Per-cell debits and credits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerPlan {
    legs: FxHashMap<Position, Leg>,
}

impl LedgerPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `resources` to leave the card at `position`.
    pub fn debit(&mut self, position: Position, resources: &ResourceBag) {
        self.legs.entry(position).or_default().debit.add_bag(resources);
    }

    /// Schedule `resources` to arrive on the card at `position`.
    pub fn credit(&mut self, position: Position, resources: &ResourceBag) {
        self.legs.entry(position).or_default().credit.add_bag(resources);
    }

    /// First cell (in position order) whose card cannot absorb its leg.
    ///
    /// A missing card counts as infeasible.
    #[must_use]
    pub fn first_infeasible(&self, grid: &Grid) -> Option<Position> {
        let mut cells: Vec<_> = self.legs.keys().copied().collect();
        cells.sort_unstable();
        cells.into_iter().find(|p| {
            let leg = &self.legs[p];
            !grid
                .card_at(*p)
                .is_some_and(|card| card.can_exchange(&leg.debit, &leg.credit))
        })
    }

    /// Apply every debit, then every credit.
    ///
    /// Callers check [`LedgerPlan::first_infeasible`] first; cells without
    /// a card are skipped.
    pub fn apply(&self, grid: &mut Grid) -> Result<(), LedgerError> {
        for (&position, leg) in &self.legs {
            if let Some(card) = grid.card_at_mut(position) {
                card.take(&leg.debit)?;
            }
        }
        for (&position, leg) in &self.legs {
            if let Some(card) = grid.card_at_mut(position) {
                card.receive(&leg.credit)?;
            }
        }
        Ok(())
    }
}
