//! Leader effect definitions.
//!
//! Effects form a closed set. Each variant carries only the data it needs
//! and nothing that points back at the market or a resource manager; the
//! resolver is handed those at the moment an effect fires.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::resources::{Resource, ResourceType};

/// A short list of resources: a cost, a profit, a transform or a discount.
pub type Bundle = SmallVec<[Resource; 4]>;

/// Build a bundle, dropping zero amounts.
#[must_use]
pub fn bundle(resources: &[Resource]) -> Bundle {
    resources.iter().copied().filter(|r| r.amount > 0).collect()
}

/// A production recipe: pay `cost`, receive `profit`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    cost: Bundle,
    profit: Bundle,
}

impl Production {
    #[must_use]
    pub fn new(cost: &[Resource], profit: &[Resource]) -> Self {
        Self {
            cost: bundle(cost),
            profit: bundle(profit),
        }
    }

    /// The production every board has: two of anything for one of anything.
    #[must_use]
    pub fn base() -> Self {
        Self::new(&[Resource::any(2)], &[Resource::any(1)])
    }

    #[must_use]
    pub fn cost(&self) -> &[Resource] {
        &self.cost
    }

    #[must_use]
    pub fn profit(&self) -> &[Resource] {
        &self.profit
    }
}

/// What an active leader contributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Each white marble assigned to this effect becomes `transform`.
    /// Fires only during white marble conversion.
    Marble { transform: Bundle },

    /// An extra production, usable once per production action.
    Production(Production),

    /// Standing reduction of development card costs.
    Discount { discount: Bundle },

    /// An extra depot locked to `kind`.
    Depot { kind: ResourceType, capacity: u32 },
}

/// Discriminator for [`Effect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Marble,
    Production,
    Discount,
    Depot,
}

impl Effect {
    #[must_use]
    pub fn marble(transform: &[Resource]) -> Self {
        Self::Marble {
            transform: bundle(transform),
        }
    }

    #[must_use]
    pub fn production(cost: &[Resource], profit: &[Resource]) -> Self {
        Self::Production(Production::new(cost, profit))
    }

    #[must_use]
    pub fn discount(discount: &[Resource]) -> Self {
        Self::Discount {
            discount: bundle(discount),
        }
    }

    #[must_use]
    pub const fn depot(kind: ResourceType, capacity: u32) -> Self {
        Self::Depot { kind, capacity }
    }

    #[must_use]
    pub const fn kind(&self) -> EffectKind {
        match self {
            Effect::Marble { .. } => EffectKind::Marble,
            Effect::Production(_) => EffectKind::Production,
            Effect::Discount { .. } => EffectKind::Discount,
            Effect::Depot { .. } => EffectKind::Depot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_drops_zero() {
        let b = bundle(&[Resource::coin(0), Resource::stone(2)]);
        assert_eq!(b.as_slice(), &[Resource::stone(2)]);
    }

    #[test]
    fn test_base_production() {
        let p = Production::base();
        assert_eq!(p.cost(), &[Resource::any(2)]);
        assert_eq!(p.profit(), &[Resource::any(1)]);
    }

    #[test]
    fn test_kind() {
        assert_eq!(Effect::marble(&[Resource::coin(1)]).kind(), EffectKind::Marble);
        assert_eq!(Effect::depot(ResourceType::Stone, 2).kind(), EffectKind::Depot);
    }

    #[test]
    fn test_effect_serialization() {
        let effect = Effect::production(&[Resource::shield(1)], &[Resource::any(1), Resource::faith(1)]);
        let json = serde_json::to_string(&effect).unwrap();
        let back: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, back);
    }
}
