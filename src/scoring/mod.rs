//! End-of-game scoring.
//!
//! Each player holds a few scoring cards. A scoring card names a
//! combination of resources and a point value; the player's score is the
//! number of complete combinations their grid holds times that value.
//! Money and pollution never count toward a combination.

use serde::{Deserialize, Serialize};

use crate::core::{Resource, ResourceBag};

/// A point total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Points(pub i64);

impl Points {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Total of `points`.
    #[must_use]
    pub fn sum(points: impl IntoIterator<Item = Points>) -> Self {
        Self(points.into_iter().map(|p| p.0).sum())
    }

    /// Total of `points`, floored at zero.
    #[must_use]
    pub fn sum_nonnegative(points: impl IntoIterator<Item = Points>) -> Self {
        Self(Self::sum(points).0.max(0))
    }
}

impl std::fmt::Display for Points {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scoring card.
///
/// ```
/// use terra_futura::core::{Resource, ResourceBag};
/// use terra_futura::scoring::{Points, ScoringMethod};
///
/// let mut method = ScoringMethod::new([Resource::Car, Resource::Gear], Points::new(5));
/// let grid = ResourceBag::from([
///     Resource::Car, Resource::Car, Resource::Gear, Resource::Gear, Resource::Gear,
/// ]);
///
/// assert_eq!(method.select_and_calculate(&grid), Points::new(10));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringMethod {
    resources: ResourceBag,
    points_per_combination: Points,
    calculated: Option<Points>,
}

impl ScoringMethod {
    #[must_use]
    pub fn new(combination: impl Into<ResourceBag>, points_per_combination: Points) -> Self {
        Self {
            resources: combination.into(),
            points_per_combination,
            calculated: None,
        }
    }

    /// The combination this card rewards.
    #[must_use]
    pub fn combination(&self) -> &ResourceBag {
        &self.resources
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.calculated.is_some()
    }

    /// The stored total, once calculated.
    #[must_use]
    pub fn total(&self) -> Option<Points> {
        self.calculated
    }

    /// Score `available`, remember the total and return it.
    pub fn select_and_calculate(&mut self, available: &ResourceBag) -> Points {
        let total = Points(self.complete_sets(available) as i64 * self.points_per_combination.0);
        self.calculated = Some(total);
        total
    }

    fn complete_sets(&self, available: &ResourceBag) -> u32 {
        self.resources
            .iter()
            .map(|(resource, needed)| match resource {
                Resource::Money | Resource::Pollution => 0,
                _ => available.count(resource) / needed,
            })
            .min()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn snapshot(&self) -> ScoringSnapshot {
        ScoringSnapshot {
            resources: self.resources,
            points_per_combination: self.points_per_combination,
            selected: self.is_selected(),
            total: self.calculated,
        }
    }
}

/// Serializable scoring card state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringSnapshot {
    pub resources: ResourceBag,
    pub points_per_combination: Points,
    pub selected: bool,
    pub total: Option<Points>,
}
