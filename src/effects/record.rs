//! Serializable effect descriptions.
//!
//! ```
//! use terra_futura::core::Resource;
//! use terra_futura::effects::Effect;
//!
//! let effect = Effect::arbitrary(2, [Resource::Bulb], 1);
//! let json = serde_json::to_string(&effect.describe()).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"type":"arbitrary","count_needed":2,"outputs":["BULB"],"pollution":1}"#
//! );
//! ```

use serde::{Deserialize, Serialize};

use super::effect::Effect;
use crate::core::ResourceBag;

/// Effect descriptor, tagged by `"type"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectRecord {
    Fixed {
        inputs: ResourceBag,
        outputs: ResourceBag,
        pollution: u32,
    },
    Arbitrary {
        count_needed: u32,
        outputs: ResourceBag,
        pollution: u32,
    },
    Or {
        effects: Vec<EffectRecord>,
    },
    Assistance,
    PollutionTransfer,
}

impl From<Effect> for EffectRecord {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::Fixed {
                inputs,
                outputs,
                pollution,
            } => EffectRecord::Fixed {
                inputs,
                outputs,
                pollution,
            },
            Effect::Arbitrary {
                count,
                outputs,
                pollution,
            } => EffectRecord::Arbitrary {
                count_needed: count,
                outputs,
                pollution,
            },
            Effect::Or(alternatives) => EffectRecord::Or {
                effects: alternatives.into_iter().map(Into::into).collect(),
            },
            Effect::Assistance => EffectRecord::Assistance,
            Effect::PollutionTransfer => EffectRecord::PollutionTransfer,
        }
    }
}

impl From<EffectRecord> for Effect {
    fn from(record: EffectRecord) -> Self {
        match record {
            EffectRecord::Fixed {
                inputs,
                outputs,
                pollution,
            } => Effect::Fixed {
                inputs,
                outputs,
                pollution,
            },
            EffectRecord::Arbitrary {
                count_needed,
                outputs,
                pollution,
            } => Effect::Arbitrary {
                count: count_needed,
                outputs,
                pollution,
            },
            EffectRecord::Or { effects } => Effect::Or(effects.into_iter().map(Into::into).collect()),
            EffectRecord::Assistance => Effect::Assistance,
            EffectRecord::PollutionTransfer => Effect::PollutionTransfer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Resource::*;
    use serde_json::json;

    #[test]
    fn test_fixed_record_shape() {
        let record = Effect::fixed([Red, Green], [Car], 1).describe();
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "type": "fixed",
                "inputs": ["GREEN", "RED"],
                "outputs": ["CAR"],
                "pollution": 1
            })
        );
    }

    #[test]
    fn test_marker_records() {
        assert_eq!(
            serde_json::to_value(Effect::Assistance.describe()).unwrap(),
            json!({ "type": "assistance" })
        );
        assert_eq!(
            serde_json::to_value(Effect::PollutionTransfer.describe()).unwrap(),
            json!({ "type": "pollution_transfer" })
        );
    }

    #[test]
    fn test_or_loads_from_json() {
        let effect: Effect = serde_json::from_value(json!({
            "type": "or",
            "effects": [
                { "type": "fixed", "inputs": ["RED"], "outputs": ["GEAR"], "pollution": 0 },
                { "type": "assistance" }
            ]
        }))
        .unwrap();

        assert!(effect.has_assistance());
        assert!(effect.check(&[Red], &[Gear], 0));
    }
}
