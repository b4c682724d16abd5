//! Activation with another player's assistance.
//!
//! An assistable card may be activated through the *secondary* effect of a
//! card owned by another player. The activating grid pays and receives as
//! usual; the assisting player is then owed a reward, announced through the
//! processor's [`RewardSelector`].
//!
//! ## Modes
//!
//! - **Standard**: inputs are debited, gained resources land on the
//!   activated card, each pollution target receives one unit, and the
//!   reward offer is the paid resources.
//! - **Pollution transfer**: chosen when pollution is emitted but nothing
//!   is paid. Exactly one target must be named; one pollution unit moves
//!   from it onto the card at the origin, and the offer is that pollution.
//!
//! A player can never assist an activation on their own grid, and an
//! activation is refused when the offer is empty or the assisting card
//! could hold none of the offered resources.
//!
//! Unlike direct activation, input sources and pollution targets only need
//! to hold a card; their activation flags are not consulted. Output
//! positions are ignored: gained resources always go to the activated card.

use tracing::{debug, debug_span, info, warn};

use super::plan::LedgerPlan;
use super::rejection::Rejection;
use super::transaction::Transaction;
use crate::cards::Card;
use crate::core::{PlayerId, Position, Resource, ResourceBag};
use crate::error::LedgerError;
use crate::grid::Grid;
use crate::reward::{PendingReward, RewardMode, RewardSelector};

/// A validated assisted activation, ready to apply.
struct AssistedPlan {
    ledger: LedgerPlan,
    reward: PendingReward,
}

/// Validates and executes assisted activations.
#[derive(Debug, Default)]
pub struct AssistedActionProcessor<R> {
    selector: R,
}

impl<R: RewardSelector> AssistedActionProcessor<R> {
    /// Create a processor reporting rewards to `selector`.
    pub fn new(selector: R) -> Self {
        Self { selector }
    }

    pub fn selector(&self) -> &R {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut R {
        &mut self.selector
    }

    /// Dry run: report why the activation would be refused, touching nothing.
    pub fn check(
        &self,
        grid: &Grid,
        assisting_player: Option<PlayerId>,
        assisting_card: Option<&Card>,
        tx: &Transaction,
    ) -> Result<(), Rejection> {
        Self::plan(grid, assisting_player, assisting_card, tx).map(drop)
    }

    /// Validate the assisted activation and, if accepted, apply it and
    /// announce the reward.
    ///
    /// Returns `Ok(false)` for a refused activation; an `Err` means the grid
    /// broke a ledger contract after validation passed.
    pub fn activate(
        &mut self,
        grid: &mut Grid,
        assisting_player: Option<PlayerId>,
        assisting_card: Option<&Card>,
        tx: &Transaction,
    ) -> Result<bool, LedgerError> {
        let span = debug_span!(
            "assisted_activation",
            card = %tx.card,
            owner = %grid.owner(),
            assistant = ?assisting_player,
        );
        let _entered = span.enter();

        let plan = match Self::plan(grid, assisting_player, assisting_card, tx) {
            Ok(plan) => plan,
            Err(Rejection::SelfAssist) => {
                warn!(player = %grid.owner(), "Self-assistance refused");
                return Ok(false);
            }
            Err(reason) => {
                debug!(%reason, "Assisted activation rejected");
                return Ok(false);
            }
        };

        plan.ledger.apply(grid)?;
        let PendingReward {
            player,
            card,
            offered,
            mode,
        } = plan.reward;
        info!(%player, %mode, "Assisted activation applied");
        self.selector.set_reward(player, card, offered, mode);
        Ok(true)
    }

    fn plan(
        grid: &Grid,
        assisting_player: Option<PlayerId>,
        assisting_card: Option<&Card>,
        tx: &Transaction,
    ) -> Result<AssistedPlan, Rejection> {
        let (Some(assistant), Some(helper)) = (assisting_player, assisting_card) else {
            return Err(Rejection::NoAssistant);
        };
        if assistant == grid.owner() {
            return Err(Rejection::SelfAssist);
        }

        let position = grid
            .position_of(tx.card)
            .ok_or(Rejection::CardNotOnGrid(tx.card))?;
        let card = grid
            .card_at(position)
            .ok_or(Rejection::CardNotOnGrid(tx.card))?;
        if !card.is_assistable() {
            return Err(Rejection::NotAssistable(tx.card));
        }
        if !grid.is_activatable(position) {
            return Err(Rejection::NotActivatable(position));
        }

        let paid = tx.input_resources();
        let gained = tx.output_resources();
        let pollution = tx.pollution_count();
        if !helper.matches_secondary(&paid, &gained, pollution) {
            return Err(Rejection::AssistingEffectMismatch);
        }

        let mut ledger = LedgerPlan::new();
        for (source, resources) in tx.inputs_by_source() {
            let holder = grid
                .card_at(source)
                .ok_or(Rejection::MissingSource(source))?;
            if !holder.can_take(&resources) {
                return Err(Rejection::InsufficientSource(source));
            }
            ledger.debit(source, &resources);
        }

        if let Some(&missing) = tx.pollution.iter().find(|&&p| grid.card_at(p).is_none()) {
            return Err(Rejection::MissingPollutionTarget(missing));
        }

        let unit = ResourceBag::from([Resource::Pollution]);
        let (offered, mode) = if pollution > 0 && paid.is_empty() {
            let [target] = tx.pollution.as_slice() else {
                return Err(Rejection::TransferCardinality(tx.pollution.len()));
            };
            if grid.card_at(Position::ORIGIN).is_none() {
                return Err(Rejection::NoOrigin);
            }
            if grid.card_at(*target).map_or(0, Card::pollution) == 0 {
                return Err(Rejection::NothingToTransfer(*target));
            }
            ledger.debit(*target, &unit);
            ledger.credit(Position::ORIGIN, &unit);
            (vec![Resource::Pollution], RewardMode::Pollution)
        } else {
            for &target in &tx.pollution {
                ledger.credit(target, &unit);
            }
            (paid.to_vec(), RewardMode::Assistance)
        };

        ledger.credit(position, &gained);
        if let Some(full) = ledger.first_infeasible(grid) {
            return Err(Rejection::CapacityExceeded(full));
        }

        if offered.is_empty() {
            return Err(Rejection::EmptyReward);
        }
        if !offered
            .iter()
            .any(|&resource| helper.can_receive(&ResourceBag::from([resource])))
        {
            return Err(Rejection::RewardUnplaceable(helper.id()));
        }

        Ok(AssistedPlan {
            ledger,
            reward: PendingReward {
                player: assistant,
                card: helper.id(),
                offered,
                mode,
            },
        })
    }
}
