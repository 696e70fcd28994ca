//! Resource types, amounts and bags.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EngineError, Result};

/// Kind of resource.
///
/// `Coin`, `Stone`, `Servant` and `Shield` are concrete and storable.
/// `Faith` is tallied and turned into faith-track steps, never stored.
/// `Any` is an unresolved wildcard amount that must be converted into
/// concrete kinds before it touches storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceType {
    Coin,
    Stone,
    Servant,
    Shield,
    Faith,
    Any,
}

impl ResourceType {
    /// The storable kinds.
    pub const CONCRETE: [ResourceType; 4] = [
        ResourceType::Coin,
        ResourceType::Stone,
        ResourceType::Servant,
        ResourceType::Shield,
    ];

    /// Whether this kind can enter a depot or the strongbox.
    #[must_use]
    pub const fn is_concrete(self) -> bool {
        matches!(
            self,
            ResourceType::Coin | ResourceType::Stone | ResourceType::Servant | ResourceType::Shield
        )
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceType::Coin => "coin",
            ResourceType::Stone => "stone",
            ResourceType::Servant => "servant",
            ResourceType::Shield => "shield",
            ResourceType::Faith => "faith",
            ResourceType::Any => "any",
        };
        f.write_str(name)
    }
}

/// An amount of a single resource kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    pub kind: ResourceType,
    pub amount: u32,
}

impl Resource {
    #[must_use]
    pub const fn new(kind: ResourceType, amount: u32) -> Self {
        Self { kind, amount }
    }

    #[must_use]
    pub const fn coin(amount: u32) -> Self {
        Self::new(ResourceType::Coin, amount)
    }

    #[must_use]
    pub const fn stone(amount: u32) -> Self {
        Self::new(ResourceType::Stone, amount)
    }

    #[must_use]
    pub const fn servant(amount: u32) -> Self {
        Self::new(ResourceType::Servant, amount)
    }

    #[must_use]
    pub const fn shield(amount: u32) -> Self {
        Self::new(ResourceType::Shield, amount)
    }

    #[must_use]
    pub const fn faith(amount: u32) -> Self {
        Self::new(ResourceType::Faith, amount)
    }

    #[must_use]
    pub const fn any(amount: u32) -> Self {
        Self::new(ResourceType::Any, amount)
    }

    /// Same kind, amount multiplied by `factor`, saturating at `u32::MAX`.
    #[must_use]
    pub const fn scaled(self, factor: u32) -> Self {
        Self::new(self.kind, self.amount.saturating_mul(factor))
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.kind)
    }
}

/// Multiset of resources keyed by kind.
///
/// Used for the strongbox, the action buffer, discounts and the production
/// queue. Entries never hold zero, so two bags with the same contents
/// compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceBag {
    counts: FxHashMap<ResourceType, u32>,
}

impl ResourceBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount held of `kind`.
    #[must_use]
    pub fn get(&self, kind: ResourceType) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Add `resource`, saturating at `u32::MAX`.
    ///
    /// Player-declared amounts go through [`checked_total`] first.
    pub fn add(&mut self, resource: Resource) {
        if resource.amount > 0 {
            let held = self.counts.entry(resource.kind).or_insert(0);
            *held = held.saturating_add(resource.amount);
        }
    }

    pub fn add_all<'a>(&mut self, resources: impl IntoIterator<Item = &'a Resource>) {
        for resource in resources {
            self.add(*resource);
        }
    }

    pub fn add_bag(&mut self, other: &ResourceBag) {
        for (&kind, &amount) in &other.counts {
            self.add(Resource::new(kind, amount));
        }
    }

    /// Remove `resource`; fails without touching the bag if not enough is held.
    pub fn sub(&mut self, resource: Resource) -> Result<()> {
        let held = self.get(resource.kind);
        if held < resource.amount {
            return Err(EngineError::NegativeResource { resource: resource.kind });
        }
        self.set(resource.kind, held - resource.amount);
        Ok(())
    }

    /// Remove as much of `resource` as is held, returning what was removed.
    pub fn sub_saturating(&mut self, resource: Resource) -> u32 {
        let held = self.get(resource.kind);
        let removed = held.min(resource.amount);
        self.set(resource.kind, held - removed);
        removed
    }

    /// Remove and return everything held of `kind`.
    pub fn take(&mut self, kind: ResourceType) -> u32 {
        self.counts.remove(&kind).unwrap_or(0)
    }

    fn set(&mut self, kind: ResourceType, amount: u32) {
        if amount == 0 {
            self.counts.remove(&kind);
        } else {
            self.counts.insert(kind, amount);
        }
    }

    /// Sum of all amounts.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.values().fold(0u32, |acc, n| acc.saturating_add(*n))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Contents as resources, ordered by kind.
    #[must_use]
    pub fn resources(&self) -> Vec<Resource> {
        let mut out: Vec<_> = self
            .counts
            .iter()
            .map(|(&kind, &amount)| Resource::new(kind, amount))
            .collect();
        out.sort_by_key(|r| r.kind);
        out
    }
}

/// Sum of `resources`, `None` if it does not fit a `u32`.
#[must_use]
pub fn checked_total(resources: &[Resource]) -> Option<u32> {
    resources.iter().try_fold(0u32, |acc, r| acc.checked_add(r.amount))
}

impl FromIterator<Resource> for ResourceBag {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        let mut bag = Self::new();
        for resource in iter {
            bag.add(resource);
        }
        bag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_kinds() {
        assert!(ResourceType::Coin.is_concrete());
        assert!(ResourceType::Shield.is_concrete());
        assert!(!ResourceType::Faith.is_concrete());
        assert!(!ResourceType::Any.is_concrete());
    }

    #[test]
    fn test_bag_add_merges_kinds() {
        let bag: ResourceBag = [Resource::coin(2), Resource::stone(1), Resource::coin(3)]
            .into_iter()
            .collect();

        assert_eq!(bag.get(ResourceType::Coin), 5);
        assert_eq!(bag.get(ResourceType::Stone), 1);
        assert_eq!(bag.total(), 6);
    }

    #[test]
    fn test_large_amounts_saturate() {
        let mut bag: ResourceBag = [Resource::coin(u32::MAX)].into_iter().collect();
        bag.add(Resource::coin(2));
        bag.add(Resource::stone(1));

        assert_eq!(bag.get(ResourceType::Coin), u32::MAX);
        assert_eq!(bag.total(), u32::MAX);
        assert_eq!(Resource::coin(u32::MAX).scaled(2), Resource::coin(u32::MAX));
        assert_eq!(Resource::coin(3).scaled(2), Resource::coin(6));
    }

    #[test]
    fn test_checked_total() {
        assert_eq!(checked_total(&[Resource::coin(2), Resource::stone(3)]), Some(5));
        assert_eq!(checked_total(&[]), Some(0));
        assert_eq!(checked_total(&[Resource::coin(u32::MAX), Resource::stone(2)]), None);
    }

    #[test]
    fn test_bag_sub_is_atomic() {
        let mut bag: ResourceBag = [Resource::coin(5)].into_iter().collect();

        assert!(bag.sub(Resource::coin(3)).is_ok());
        assert_eq!(bag.get(ResourceType::Coin), 2);

        let err = bag.sub(Resource::coin(10)).unwrap_err();
        assert_eq!(err, EngineError::NegativeResource { resource: ResourceType::Coin });
        assert_eq!(bag.get(ResourceType::Coin), 2);
    }

    #[test]
    fn test_bag_drops_zero_entries() {
        let mut a: ResourceBag = [Resource::coin(1)].into_iter().collect();
        a.sub(Resource::coin(1)).unwrap();
        a.add(Resource::shield(0));

        assert!(a.is_empty());
        assert_eq!(a, ResourceBag::new());
    }

    #[test]
    fn test_bag_resources_sorted() {
        let bag: ResourceBag = [Resource::shield(1), Resource::coin(2)].into_iter().collect();
        assert_eq!(bag.resources(), vec![Resource::coin(2), Resource::shield(1)]);
    }

    #[test]
    fn test_sub_saturating_and_take() {
        let mut bag: ResourceBag = [Resource::stone(2), Resource::faith(3)].into_iter().collect();

        assert_eq!(bag.sub_saturating(Resource::stone(5)), 2);
        assert_eq!(bag.take(ResourceType::Faith), 3);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_bag_serialization() {
        let bag: ResourceBag = [Resource::servant(4), Resource::coin(1)].into_iter().collect();
        let json = serde_json::to_string(&bag).unwrap();
        let back: ResourceBag = serde_json::from_str(&json).unwrap();
        assert_eq!(bag, back);
    }
}
