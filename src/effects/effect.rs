//! Production effects.
//!
//! An effect is a predicate over a proposed exchange: the resources paid,
//! the resources produced and the number of pollution units emitted. It
//! never mutates anything; processors call [`Effect::check`] and then move
//! resources themselves.

use serde::{Deserialize, Serialize};

use super::record::EffectRecord;
use crate::core::{Resource, ResourceBag};

/// A production rule bound to a card.
///
/// ## Variants
///
/// - `Fixed`: exact input and output multisets plus an exact pollution count.
/// - `Arbitrary`: any `count` raw resources in, fixed outputs and pollution.
/// - `Or`: satisfied when any alternative is.
/// - `Assistance`: marks a card another player may assist; matches nothing.
/// - `PollutionTransfer`: matches only an exchange with no inputs and no
///   outputs, whatever the pollution count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EffectRecord", into = "EffectRecord")]
pub enum Effect {
    Fixed {
        inputs: ResourceBag,
        outputs: ResourceBag,
        pollution: u32,
    },
    Arbitrary {
        count: u32,
        outputs: ResourceBag,
        pollution: u32,
    },
    Or(Vec<Effect>),
    Assistance,
    PollutionTransfer,
}

impl Effect {
    /// Exact exchange of `inputs` for `outputs`.
    #[must_use]
    pub fn fixed(
        inputs: impl Into<ResourceBag>,
        outputs: impl Into<ResourceBag>,
        pollution: u32,
    ) -> Self {
        Effect::Fixed {
            inputs: inputs.into(),
            outputs: outputs.into(),
            pollution,
        }
    }

    /// Any `count` raw resources for `outputs`.
    #[must_use]
    pub fn arbitrary(count: u32, outputs: impl Into<ResourceBag>, pollution: u32) -> Self {
        Effect::Arbitrary {
            count,
            outputs: outputs.into(),
            pollution,
        }
    }

    /// Union of alternatives.
    #[must_use]
    pub fn or(alternatives: impl IntoIterator<Item = Effect>) -> Self {
        Effect::Or(alternatives.into_iter().collect())
    }

    /// Check whether the exchange satisfies this effect.
    ///
    /// Inputs and outputs compare as multisets; order is irrelevant.
    #[must_use]
    pub fn check(&self, inputs: &[Resource], outputs: &[Resource], pollution: u32) -> bool {
        self.check_bags(&inputs.into(), &outputs.into(), pollution)
    }

    /// [`Effect::check`] over already grouped resources.
    #[must_use]
    pub fn check_bags(&self, inputs: &ResourceBag, outputs: &ResourceBag, pollution: u32) -> bool {
        match self {
            Effect::Fixed {
                inputs: needed,
                outputs: produced,
                pollution: emitted,
            } => inputs == needed && outputs == produced && pollution == *emitted,
            Effect::Arbitrary {
                count,
                outputs: produced,
                pollution: emitted,
            } => {
                inputs.total() == *count
                    && inputs.iter().all(|(r, _)| r.is_raw())
                    && outputs == produced
                    && pollution == *emitted
            }
            Effect::Or(alternatives) => alternatives
                .iter()
                .any(|e| e.check_bags(inputs, outputs, pollution)),
            Effect::Assistance => false,
            Effect::PollutionTransfer => inputs.is_empty() && outputs.is_empty(),
        }
    }

    /// Check whether this effect marks its card as assistable.
    #[must_use]
    pub fn has_assistance(&self) -> bool {
        match self {
            Effect::Assistance => true,
            Effect::Or(alternatives) => alternatives.iter().any(Effect::has_assistance),
            Effect::Fixed { .. } | Effect::Arbitrary { .. } | Effect::PollutionTransfer => false,
        }
    }

    /// Serializable description.
    #[must_use]
    pub fn describe(&self) -> EffectRecord {
        self.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Resource::*;

    #[test]
    fn test_fixed_is_exact() {
        let effect = Effect::fixed([Red, Green], [Car], 1);

        assert!(effect.check(&[Green, Red], &[Car], 1));
        assert!(!effect.check(&[Green, Red], &[Car], 0));
        assert!(!effect.check(&[Red], &[Car], 1));
        assert!(!effect.check(&[Green, Red, Red], &[Car], 1));
        assert!(!effect.check(&[Green, Red], &[Car, Car], 1));
    }

    #[test]
    fn test_arbitrary_requires_raw_inputs() {
        let effect = Effect::arbitrary(2, [Bulb], 0);

        assert!(effect.check(&[Green, Yellow], &[Bulb], 0));
        assert!(effect.check(&[Red, Red], &[Bulb], 0));
        assert!(!effect.check(&[Green, Car], &[Bulb], 0));
        assert!(!effect.check(&[Green], &[Bulb], 0));
        assert!(!effect.check(&[Green, Red, Yellow], &[Bulb], 0));
        assert!(!effect.check(&[Green, Red], &[Gear], 0));
    }

    #[test]
    fn test_or_matches_any_alternative() {
        let effect = Effect::or([
            Effect::fixed([Red], [Gear], 0),
            Effect::fixed([Green], [Bulb], 1),
        ]);

        assert!(effect.check(&[Red], &[Gear], 0));
        assert!(effect.check(&[Green], &[Bulb], 1));
        assert!(!effect.check(&[Red], &[Bulb], 1));
        assert!(!Effect::Or(Vec::new()).check(&[], &[], 0));
    }

    #[test]
    fn test_assistance_flag() {
        assert!(Effect::Assistance.has_assistance());
        assert!(!Effect::Assistance.check(&[], &[], 0));
        assert!(Effect::or([Effect::fixed([Red], [Car], 0), Effect::Assistance]).has_assistance());
        assert!(!Effect::fixed([Red], [Car], 0).has_assistance());
        assert!(!Effect::PollutionTransfer.has_assistance());
        assert!(!Effect::arbitrary(2, [Bulb], 1).has_assistance());
    }

    #[test]
    fn test_pollution_transfer_accepts_empty_exchange() {
        let effect = Effect::PollutionTransfer;

        assert!(effect.check(&[], &[], 0));
        assert!(effect.check(&[], &[], 1));
        assert!(!effect.check(&[Red], &[], 1));
        assert!(!effect.check(&[], &[Car], 1));
    }
}
