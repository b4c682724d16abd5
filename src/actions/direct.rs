//! Activation without assistance.
//!
//! ## Validation
//!
//! Checked in order; the first failure rejects the transaction and nothing
//! changes:
//!
//! 1. The card is on the grid and its cell is activatable.
//! 2. The exchange matches the card's primary or secondary effect.
//! 3. Every output goes to the activated card itself.
//! 4. Each input source holds an activatable card that has the inputs.
//! 5. Each pollution target holds an activatable card.
//! 6. Every touched card stays within its pollution capacity once the whole
//!    transaction is applied.
//!
//! ## Execution
//!
//! Inputs are taken from their sources, outputs land on the activated card,
//! and each pollution target receives one pollution unit per entry.

use tracing::{debug, info};

use super::plan::LedgerPlan;
use super::rejection::Rejection;
use super::transaction::Transaction;
use crate::core::{Resource, ResourceBag};
use crate::error::LedgerError;
use crate::grid::Grid;

/// Validates and executes unassisted activations.
pub struct DirectActionProcessor;

impl DirectActionProcessor {
    /// Dry run: report why `tx` would be refused, touching nothing.
    pub fn check(grid: &Grid, tx: &Transaction) -> Result<(), Rejection> {
        Self::plan(grid, tx).map(drop)
    }

    /// Validate `tx` and, if accepted, apply it.
    ///
    /// Returns `Ok(false)` for a refused transaction. An `Err` means the
    /// grid broke a ledger contract after validation passed.
    pub fn activate(grid: &mut Grid, tx: &Transaction) -> Result<bool, LedgerError> {
        let plan = match Self::plan(grid, tx) {
            Ok(plan) => plan,
            Err(reason) => {
                debug!(card = %tx.card, %reason, "Activation rejected");
                return Ok(false);
            }
        };

        plan.apply(grid)?;
        info!(
            card = %tx.card,
            inputs = tx.inputs.len(),
            outputs = tx.outputs.len(),
            pollution = tx.pollution.len(),
            "Card activated"
        );
        Ok(true)
    }

    fn plan(grid: &Grid, tx: &Transaction) -> Result<LedgerPlan, Rejection> {
        let position = grid
            .position_of(tx.card)
            .ok_or(Rejection::CardNotOnGrid(tx.card))?;
        let card = grid
            .card_at(position)
            .ok_or(Rejection::CardNotOnGrid(tx.card))?;
        if !grid.is_activatable(position) {
            return Err(Rejection::NotActivatable(position));
        }

        let inputs = tx.input_resources();
        let outputs = tx.output_resources();
        let pollution = tx.pollution_count();
        if !card.matches_primary(&inputs, &outputs, pollution)
            && !card.matches_secondary(&inputs, &outputs, pollution)
        {
            return Err(Rejection::EffectMismatch);
        }

        if let Some(&(_, elsewhere)) = tx.outputs.iter().find(|&&(_, p)| p != position) {
            return Err(Rejection::OutputElsewhere(elsewhere));
        }

        let mut plan = LedgerPlan::new();
        for (source, resources) in tx.inputs_by_source() {
            let holder = grid
                .card_at(source)
                .ok_or(Rejection::MissingSource(source))?;
            if !grid.is_activatable(source) {
                return Err(Rejection::SourceNotActivatable(source));
            }
            if !holder.can_take(&resources) {
                return Err(Rejection::InsufficientSource(source));
            }
            plan.debit(source, &resources);
        }

        let unit = ResourceBag::from([Resource::Pollution]);
        for &target in &tx.pollution {
            if grid.card_at(target).is_none() {
                return Err(Rejection::MissingPollutionTarget(target));
            }
            if !grid.is_activatable(target) {
                return Err(Rejection::PollutionTargetNotActivatable(target));
            }
            plan.credit(target, &unit);
        }

        plan.credit(position, &outputs);
        if let Some(full) = plan.first_infeasible(grid) {
            return Err(Rejection::CapacityExceeded(full));
        }
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId};
    use crate::core::{PlayerId, Position, Resource::*};
    use crate::effects::Effect;

    const FACTORY: Position = Position::ORIGIN;
    const FARM: Position = Position::new(0, 1);

    fn grid() -> Grid {
        let mut grid = Grid::new(PlayerId::new(0));
        grid.put_card(
            FACTORY,
            Card::new(CardId::new(1), 1).with_primary(Effect::fixed([Red, Green], [Car], 1)),
        )
        .unwrap();
        grid.put_card(FARM, Card::new(CardId::new(2), 1).with_resources([Red, Green]))
            .unwrap();
        grid.set_activatable(FACTORY);
        grid.set_activatable(FARM);
        grid
    }

    fn car_tx() -> Transaction {
        Transaction::new(CardId::new(1))
            .input(Red, FARM)
            .input(Green, FARM)
            .output(Car, FACTORY)
            .pollute(FACTORY)
    }

    #[test]
    fn test_activation_applies() {
        let mut grid = grid();

        assert!(DirectActionProcessor::activate(&mut grid, &car_tx()).unwrap());
        assert!(grid.card_at(FARM).unwrap().resources().is_empty());
        assert_eq!(
            grid.card_at(FACTORY).unwrap().resources(),
            &ResourceBag::from([Car, Pollution])
        );
    }

    #[test]
    fn test_rejections_in_order() {
        let grid = grid();

        let unknown = Transaction::new(CardId::new(99));
        assert_eq!(
            DirectActionProcessor::check(&grid, &unknown),
            Err(Rejection::CardNotOnGrid(CardId::new(99)))
        );

        let wrong_effect = car_tx().output(Car, FACTORY);
        assert_eq!(
            DirectActionProcessor::check(&grid, &wrong_effect),
            Err(Rejection::EffectMismatch)
        );

        let mut misdirected = car_tx();
        misdirected.outputs[0].1 = FARM;
        assert_eq!(
            DirectActionProcessor::check(&grid, &misdirected),
            Err(Rejection::OutputElsewhere(FARM))
        );

        let mut offgrid = car_tx();
        offgrid.pollution[0] = Position::new(1, 1);
        assert_eq!(
            DirectActionProcessor::check(&grid, &offgrid),
            Err(Rejection::MissingPollutionTarget(Position::new(1, 1)))
        );
    }

    #[test]
    fn test_unflagged_source_rejected() {
        let mut grid = grid();
        grid.mark_activated(FARM);

        assert_eq!(
            DirectActionProcessor::check(&grid, &car_tx()),
            Err(Rejection::SourceNotActivatable(FARM))
        );
        assert!(!DirectActionProcessor::activate(&mut grid, &car_tx()).unwrap());
    }

    #[test]
    fn test_capacity_checked_before_mutation() {
        let mut grid = Grid::new(PlayerId::new(0));
        grid.put_card(
            FACTORY,
            Card::new(CardId::new(1), 0)
                .with_resources([Red, Green])
                .with_primary(Effect::fixed([Red, Green], [Car], 1)),
        )
        .unwrap();
        grid.set_activatable(FACTORY);
        let before = grid.snapshot();

        let tx = Transaction::new(CardId::new(1))
            .input(Red, FACTORY)
            .input(Green, FACTORY)
            .output(Car, FACTORY)
            .pollute(FACTORY);

        assert_eq!(
            DirectActionProcessor::check(&grid, &tx),
            Err(Rejection::CapacityExceeded(FACTORY))
        );
        assert!(!DirectActionProcessor::activate(&mut grid, &tx).unwrap());
        assert_eq!(grid.snapshot(), before);
    }
}
