//! Resources and resource multisets.
//!
//! ## Resource
//!
//! The closed set of commodities a card ledger can hold. Green, red and
//! yellow are *raw* resources; pollution is a byproduct bounded by each
//! card's pollution capacity.
//!
//! ## ResourceBag
//!
//! A fixed-size multiset of resources, one counter per variant. Every card
//! ledger and every grouped transaction leg is a `ResourceBag`, so subset
//! tests and equality are constant time.
//!
//! ```
//! use terra_futura::core::{Resource, ResourceBag};
//!
//! let ledger = ResourceBag::from([Resource::Red, Resource::Red, Resource::Green]);
//! let cost = ResourceBag::from([Resource::Red, Resource::Green]);
//!
//! assert!(ledger.contains(&cost));
//! assert_eq!(ledger.count(Resource::Red), 2);
//! assert_eq!(ledger.total(), 3);
//! ```

use serde::{Deserialize, Serialize};

/// A commodity held on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Resource {
    Green,
    Red,
    Yellow,
    Bulb,
    Gear,
    Car,
    Money,
    Pollution,
}

impl Resource {
    /// Number of resource variants.
    pub const COUNT: usize = 8;

    /// Every resource, in declaration order.
    pub const ALL: [Resource; Self::COUNT] = [
        Resource::Green,
        Resource::Red,
        Resource::Yellow,
        Resource::Bulb,
        Resource::Gear,
        Resource::Car,
        Resource::Money,
        Resource::Pollution,
    ];

    /// Raw resources accepted by arbitrary-input effects.
    pub const RAW: [Resource; 3] = [Resource::Green, Resource::Red, Resource::Yellow];

    /// Check if this is a raw resource (green, red or yellow).
    #[must_use]
    pub const fn is_raw(self) -> bool {
        matches!(self, Resource::Green | Resource::Red | Resource::Yellow)
    }

    /// Upper-case name, as used in snapshots.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Resource::Green => "GREEN",
            Resource::Red => "RED",
            Resource::Yellow => "YELLOW",
            Resource::Bulb => "BULB",
            Resource::Gear => "GEAR",
            Resource::Car => "CAR",
            Resource::Money => "MONEY",
            Resource::Pollution => "POLLUTION",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Multiset of resources.
///
/// Serializes as a flat list of resource names in declaration order, so two
/// equal bags always produce the same JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Resource>", into = "Vec<Resource>")]
pub struct ResourceBag {
    counts: [u32; Resource::COUNT],
}

impl ResourceBag {
    /// Create an empty bag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: [0; Resource::COUNT],
        }
    }

    /// Number of units of `resource`.
    #[must_use]
    pub const fn count(&self, resource: Resource) -> u32 {
        self.counts[resource.index()]
    }

    /// Total number of units across all resources.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Check if the bag holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&n| n == 0)
    }

    /// Add `amount` units of `resource`.
    pub fn add(&mut self, resource: Resource, amount: u32) {
        self.counts[resource.index()] += amount;
    }

    /// Add every unit of `other`.
    pub fn add_bag(&mut self, other: &ResourceBag) {
        for (slot, n) in self.counts.iter_mut().zip(other.counts) {
            *slot += n;
        }
    }

    /// Check if every unit of `other` is present here (multiset subset).
    #[must_use]
    pub fn contains(&self, other: &ResourceBag) -> bool {
        self.counts
            .iter()
            .zip(other.counts)
            .all(|(&held, wanted)| held >= wanted)
    }

    /// First resource of `other` this bag cannot cover, if any.
    #[must_use]
    pub fn first_shortfall(&self, other: &ResourceBag) -> Option<Resource> {
        Resource::ALL
            .into_iter()
            .find(|&r| self.count(r) < other.count(r))
    }

    /// Remove every unit of `other`.
    ///
    /// Returns `false` and leaves the bag untouched if `other` is not a subset.
    pub fn remove_bag(&mut self, other: &ResourceBag) -> bool {
        if !self.contains(other) {
            return false;
        }
        for (slot, n) in self.counts.iter_mut().zip(other.counts) {
            *slot -= n;
        }
        true
    }

    /// Iterate over `(resource, count)` pairs with a non-zero count.
    pub fn iter(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        Resource::ALL
            .into_iter()
            .map(|r| (r, self.count(r)))
            .filter(|&(_, n)| n > 0)
    }

    /// Expand into a flat list, in declaration order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Resource> {
        self.iter()
            .flat_map(|(r, n)| std::iter::repeat(r).take(n as usize))
            .collect()
    }
}

impl FromIterator<Resource> for ResourceBag {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        let mut bag = Self::new();
        bag.extend(iter);
        bag
    }
}

impl<'a> FromIterator<&'a Resource> for ResourceBag {
    fn from_iter<I: IntoIterator<Item = &'a Resource>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl Extend<Resource> for ResourceBag {
    fn extend<I: IntoIterator<Item = Resource>>(&mut self, iter: I) {
        for resource in iter {
            self.add(resource, 1);
        }
    }
}

impl<const N: usize> From<[Resource; N]> for ResourceBag {
    fn from(resources: [Resource; N]) -> Self {
        resources.into_iter().collect()
    }
}

impl From<&[Resource]> for ResourceBag {
    fn from(resources: &[Resource]) -> Self {
        resources.iter().collect()
    }
}

impl From<Vec<Resource>> for ResourceBag {
    fn from(resources: Vec<Resource>) -> Self {
        resources.into_iter().collect()
    }
}

impl From<ResourceBag> for Vec<Resource> {
    fn from(bag: ResourceBag) -> Self {
        bag.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_resources() {
        for r in Resource::RAW {
            assert!(r.is_raw());
        }
        assert!(!Resource::Car.is_raw());
        assert!(!Resource::Money.is_raw());
        assert!(!Resource::Pollution.is_raw());
    }

    #[test]
    fn test_bag_counts() {
        let bag = ResourceBag::from([Resource::Red, Resource::Car, Resource::Red]);

        assert_eq!(bag.count(Resource::Red), 2);
        assert_eq!(bag.count(Resource::Car), 1);
        assert_eq!(bag.count(Resource::Green), 0);
        assert_eq!(bag.total(), 3);
        assert!(!bag.is_empty());
        assert!(ResourceBag::new().is_empty());
    }

    #[test]
    fn test_bag_equality_ignores_order() {
        let a = ResourceBag::from([Resource::Red, Resource::Green]);
        let b = ResourceBag::from([Resource::Green, Resource::Red]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_bag_contains() {
        let ledger = ResourceBag::from([Resource::Red, Resource::Red, Resource::Green]);

        assert!(ledger.contains(&ResourceBag::from([Resource::Red, Resource::Red])));
        assert!(ledger.contains(&ResourceBag::new()));
        assert!(!ledger.contains(&ResourceBag::from([Resource::Red; 3])));
        assert!(!ledger.contains(&ResourceBag::from([Resource::Yellow])));
        assert_eq!(
            ledger.first_shortfall(&ResourceBag::from([Resource::Yellow])),
            Some(Resource::Yellow)
        );
    }

    #[test]
    fn test_bag_remove() {
        let mut ledger = ResourceBag::from([Resource::Red, Resource::Green]);

        assert!(!ledger.remove_bag(&ResourceBag::from([Resource::Red, Resource::Red])));
        assert_eq!(ledger.total(), 2);

        assert!(ledger.remove_bag(&ResourceBag::from([Resource::Red])));
        assert_eq!(ledger, ResourceBag::from([Resource::Green]));
    }

    #[test]
    fn test_bag_to_vec_is_sorted() {
        let bag = ResourceBag::from([Resource::Pollution, Resource::Red, Resource::Green]);
        assert_eq!(
            bag.to_vec(),
            vec![Resource::Green, Resource::Red, Resource::Pollution]
        );
    }

    #[test]
    fn test_bag_serialization() {
        let bag = ResourceBag::from([Resource::Car, Resource::Red]);
        let json = serde_json::to_string(&bag).unwrap();
        assert_eq!(json, r#"["RED","CAR"]"#);

        let deserialized: ResourceBag = serde_json::from_str(&json).unwrap();
        assert_eq!(bag, deserialized);
    }
}
