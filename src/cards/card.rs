//! Cards and their resource ledgers.
//!
//! A `Card` holds a multiset of resources, a fixed pollution capacity and up
//! to two production effects. The ledger is the only part that changes
//! during play, and every mutation that adds resources keeps the pollution
//! count within capacity.
//!
//! ## Guarded mutation
//!
//! Each mutator has a side-effect-free guard: [`Card::can_take`] for
//! [`Card::take`], [`Card::can_receive`] for [`Card::receive`]. Processors
//! always consult the guard first; calling a mutator whose guard fails is a
//! contract error reported as [`LedgerError`].
//!
//! ```
//! use terra_futura::cards::{Card, CardId};
//! use terra_futura::core::{Resource, ResourceBag};
//!
//! let mut card = Card::new(CardId::new(1), 1)
//!     .with_resources([Resource::Red, Resource::Green]);
//!
//! let pollution = ResourceBag::from([Resource::Pollution, Resource::Pollution]);
//! assert!(!card.can_receive(&pollution));
//! assert!(card.receive(&pollution).is_err());
//!
//! card.take(&ResourceBag::from([Resource::Red])).unwrap();
//! assert_eq!(card.resources(), &ResourceBag::from([Resource::Green]));
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::{Resource, ResourceBag};
use crate::effects::{Effect, EffectRecord};
use crate::error::{LedgerError, SnapshotError};

/// Identifier of a physical card, unique within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A card with its resource ledger.
///
/// Effects are shared through `Arc`, so cloning a card copies only the
/// ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    id: CardId,
    resources: ResourceBag,
    pollution_limit: u32,
    primary: Option<Arc<Effect>>,
    secondary: Option<Arc<Effect>>,
}

impl Card {
    /// Create an empty card without effects.
    #[must_use]
    pub fn new(id: CardId, pollution_limit: u32) -> Self {
        Self {
            id,
            resources: ResourceBag::new(),
            pollution_limit,
            primary: None,
            secondary: None,
        }
    }

    /// Set the starting ledger.
    ///
    /// Setup data is trusted: the pollution capacity is not checked here.
    #[must_use]
    pub fn with_resources(mut self, resources: impl Into<ResourceBag>) -> Self {
        self.resources = resources.into();
        self
    }

    /// Bind the primary (upper) effect.
    #[must_use]
    pub fn with_primary(mut self, effect: Effect) -> Self {
        self.primary = Some(Arc::new(effect));
        self
    }

    /// Bind the secondary (lower) effect.
    #[must_use]
    pub fn with_secondary(mut self, effect: Effect) -> Self {
        self.secondary = Some(Arc::new(effect));
        self
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Current ledger.
    #[must_use]
    pub fn resources(&self) -> &ResourceBag {
        &self.resources
    }

    #[must_use]
    pub fn pollution_limit(&self) -> u32 {
        self.pollution_limit
    }

    /// Pollution units currently on the card.
    #[must_use]
    pub fn pollution(&self) -> u32 {
        self.resources.count(Resource::Pollution)
    }

    #[must_use]
    pub fn primary(&self) -> Option<&Effect> {
        self.primary.as_deref()
    }

    #[must_use]
    pub fn secondary(&self) -> Option<&Effect> {
        self.secondary.as_deref()
    }

    /// Check if the ledger contains `resources`.
    #[must_use]
    pub fn can_take(&self, resources: &ResourceBag) -> bool {
        self.resources.contains(resources)
    }

    /// Remove `resources` from the ledger.
    pub fn take(&mut self, resources: &ResourceBag) -> Result<(), LedgerError> {
        if let Some(resource) = self.resources.first_shortfall(resources) {
            return Err(LedgerError::InsufficientResources {
                card: self.id,
                resource,
                held: self.resources.count(resource),
                requested: resources.count(resource),
            });
        }
        self.resources.remove_bag(resources);
        Ok(())
    }

    /// Check if adding `resources` keeps pollution within capacity.
    #[must_use]
    pub fn can_receive(&self, resources: &ResourceBag) -> bool {
        self.pollution() + resources.count(Resource::Pollution) <= self.pollution_limit
    }

    /// Add `resources` to the ledger.
    pub fn receive(&mut self, resources: &ResourceBag) -> Result<(), LedgerError> {
        if !self.can_receive(resources) {
            return Err(LedgerError::PollutionLimitExceeded {
                card: self.id,
                attempted: self.pollution() + resources.count(Resource::Pollution),
                limit: self.pollution_limit,
            });
        }
        self.resources.add_bag(resources);
        Ok(())
    }

    /// Check if `debit` can be taken and `credit` then received.
    ///
    /// Pollution leaving with the debit frees capacity for the credit.
    #[must_use]
    pub fn can_exchange(&self, debit: &ResourceBag, credit: &ResourceBag) -> bool {
        self.can_take(debit)
            && self.pollution() - debit.count(Resource::Pollution)
                + credit.count(Resource::Pollution)
                <= self.pollution_limit
    }

    /// Check the exchange against the primary effect.
    #[must_use]
    pub fn matches_primary(&self, inputs: &ResourceBag, outputs: &ResourceBag, pollution: u32) -> bool {
        self.primary
            .as_ref()
            .is_some_and(|e| e.check_bags(inputs, outputs, pollution))
    }

    /// Check the exchange against the secondary effect.
    #[must_use]
    pub fn matches_secondary(
        &self,
        inputs: &ResourceBag,
        outputs: &ResourceBag,
        pollution: u32,
    ) -> bool {
        self.secondary
            .as_ref()
            .is_some_and(|e| e.check_bags(inputs, outputs, pollution))
    }

    /// Check if another player may assist an activation of this card.
    #[must_use]
    pub fn is_assistable(&self) -> bool {
        [&self.primary, &self.secondary]
            .into_iter()
            .flatten()
            .any(|e| e.has_assistance())
    }

    /// Serializable view of the card.
    #[must_use]
    pub fn snapshot(&self) -> CardSnapshot {
        CardSnapshot {
            id: self.id,
            resources: self.resources,
            pollution_count: self.pollution(),
            pollution_limit: self.pollution_limit,
            assistance: self.is_assistable(),
            primary_effect: self.primary().map(Effect::describe),
            secondary_effect: self.secondary().map(Effect::describe),
        }
    }

    /// Rebuild a card from a snapshot.
    pub fn restore(snapshot: CardSnapshot) -> Result<Self, SnapshotError> {
        let held = snapshot.resources.count(Resource::Pollution);
        if held != snapshot.pollution_count {
            return Err(SnapshotError::PollutionMismatch {
                card: snapshot.id,
                recorded: snapshot.pollution_count,
                held,
            });
        }
        if held > snapshot.pollution_limit {
            return Err(SnapshotError::PollutionOverLimit {
                card: snapshot.id,
                count: held,
                limit: snapshot.pollution_limit,
            });
        }

        Ok(Self {
            id: snapshot.id,
            resources: snapshot.resources,
            pollution_limit: snapshot.pollution_limit,
            primary: snapshot.primary_effect.map(|r| Arc::new(r.into())),
            secondary: snapshot.secondary_effect.map(|r| Arc::new(r.into())),
        })
    }

    /// Parse a card from its snapshot JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Self::restore(serde_json::from_str(json)?)
    }
}

/// Serializable card state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSnapshot {
    pub id: CardId,
    pub resources: ResourceBag,
    pub pollution_count: u32,
    pub pollution_limit: u32,
    /// Derived from the effects; ignored on restore.
    pub assistance: bool,
    pub primary_effect: Option<EffectRecord>,
    pub secondary_effect: Option<EffectRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Resource::*;
    use serde_json::json;

    fn bag<const N: usize>(resources: [Resource; N]) -> ResourceBag {
        ResourceBag::from(resources)
    }

    #[test]
    fn test_take_requires_subset() {
        let mut card = Card::new(CardId::new(1), 0).with_resources([Red, Red, Green]);

        assert!(card.can_take(&bag([Red, Red])));
        assert!(!card.can_take(&bag([Yellow])));

        let err = card.take(&bag([Red, Red, Red])).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientResources {
                card: CardId::new(1),
                resource: Red,
                held: 2,
                requested: 3,
            }
        );
        assert_eq!(card.resources(), &bag([Red, Red, Green]));

        card.take(&bag([Red, Green])).unwrap();
        assert_eq!(card.resources(), &bag([Red]));
    }

    #[test]
    fn test_receive_respects_capacity() {
        let mut card = Card::new(CardId::new(2), 1).with_resources([Pollution]);

        assert!(card.can_receive(&bag([Car, Money])));
        assert!(!card.can_receive(&bag([Pollution])));
        assert!(matches!(
            card.receive(&bag([Pollution])),
            Err(LedgerError::PollutionLimitExceeded {
                attempted: 2,
                limit: 1,
                ..
            })
        ));

        card.receive(&bag([Car])).unwrap();
        assert_eq!(card.resources(), &bag([Pollution, Car]));
    }

    #[test]
    fn test_can_exchange_frees_capacity() {
        let card = Card::new(CardId::new(3), 1).with_resources([Pollution]);

        assert!(!card.can_receive(&bag([Pollution])));
        assert!(card.can_exchange(&bag([Pollution]), &bag([Pollution])));
        assert!(!card.can_exchange(&bag([Red]), &ResourceBag::new()));
    }

    #[test]
    fn test_effect_matching() {
        let card = Card::new(CardId::new(4), 2)
            .with_primary(Effect::fixed([Red], [Car], 0))
            .with_secondary(Effect::arbitrary(1, [Gear], 1));

        assert!(card.matches_primary(&bag([Red]), &bag([Car]), 0));
        assert!(!card.matches_secondary(&bag([Red]), &bag([Car]), 0));
        assert!(card.matches_secondary(&bag([Yellow]), &bag([Gear]), 1));

        let blank = Card::new(CardId::new(5), 0);
        assert!(!blank.matches_primary(&ResourceBag::new(), &ResourceBag::new(), 0));
        assert!(!blank.matches_secondary(&ResourceBag::new(), &ResourceBag::new(), 0));
    }

    #[test]
    fn test_assistable_from_either_effect() {
        let plain = Card::new(CardId::new(6), 0).with_primary(Effect::fixed([Red], [Car], 0));
        assert!(!plain.is_assistable());

        let lower = plain.clone().with_secondary(Effect::Assistance);
        assert!(lower.is_assistable());

        let nested = Card::new(CardId::new(7), 0)
            .with_primary(Effect::or([Effect::fixed([Red], [Car], 0), Effect::Assistance]));
        assert!(nested.is_assistable());
    }

    #[test]
    fn test_snapshot_shape() {
        let card = Card::new(CardId::new(8), 2)
            .with_resources([Red, Pollution])
            .with_secondary(Effect::Assistance);

        assert_eq!(
            serde_json::to_value(card.snapshot()).unwrap(),
            json!({
                "id": 8,
                "resources": ["RED", "POLLUTION"],
                "pollutionCount": 1,
                "pollutionLimit": 2,
                "assistance": true,
                "primaryEffect": null,
                "secondaryEffect": { "type": "assistance" }
            })
        );
    }

    #[test]
    fn test_restore() {
        let card = Card::new(CardId::new(9), 1)
            .with_resources([Green, Pollution])
            .with_primary(Effect::fixed([Green], [Bulb], 0));

        let json = serde_json::to_string(&card.snapshot()).unwrap();
        assert_eq!(Card::from_json(&json).unwrap(), card);

        let mut over = card.snapshot();
        over.pollution_limit = 0;
        assert!(matches!(
            Card::restore(over),
            Err(SnapshotError::PollutionOverLimit { count: 1, limit: 0, .. })
        ));

        let mut mismatched = card.snapshot();
        mismatched.pollution_count = 0;
        assert!(matches!(
            Card::restore(mismatched),
            Err(SnapshotError::PollutionMismatch { .. })
        ));
    }
}
