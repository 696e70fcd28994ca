//! Leader cards.
//!
//! A leader owns one [`Effect`]. It is dealt face down and does nothing
//! until activated, which requires meeting its [`LeaderRequirement`].
//!
//! ```
//! use renaissance_core::cards::{Leader, LeaderId, LeaderRequirement};
//! use renaissance_core::effects::Effect;
//! use renaissance_core::resources::{Resource, ResourceType};
//!
//! let leader = Leader::new(
//!     LeaderId::new(4),
//!     LeaderRequirement::resources(&[Resource::coin(5)]),
//!     Effect::depot(ResourceType::Stone, 2),
//! );
//! assert_eq!(leader.id.raw(), 4);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::development::CardColor;
use crate::effects::{bundle, Bundle, Effect};
use crate::resources::{Resource, ResourceType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeaderId(pub u32);

impl LeaderId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for LeaderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Leader({})", self.0)
    }
}

/// `count` development cards of `color`, of `level` if given.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRequirement {
    pub color: CardColor,
    pub level: Option<u8>,
    pub count: u32,
}

impl CardRequirement {
    #[must_use]
    pub const fn new(color: CardColor, level: Option<u8>, count: u32) -> Self {
        Self { color, level, count }
    }
}

/// What a player must own to activate a leader. Nothing is consumed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaderRequirement {
    Resources(Bundle),
    Cards(SmallVec<[CardRequirement; 3]>),
}

impl LeaderRequirement {
    #[must_use]
    pub fn resources(resources: &[Resource]) -> Self {
        Self::Resources(bundle(resources))
    }

    #[must_use]
    pub fn cards(cards: &[CardRequirement]) -> Self {
        Self::Cards(cards.iter().copied().collect())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    pub id: LeaderId,
    pub requirement: LeaderRequirement,
    pub effect: Effect,
}

impl Leader {
    #[must_use]
    pub fn new(id: LeaderId, requirement: LeaderRequirement, effect: Effect) -> Self {
        Self {
            id,
            requirement,
            effect,
        }
    }
}

/// The standard 16 leaders: four of each effect kind.
#[must_use]
pub fn standard_leaders() -> Vec<Leader> {
    use CardColor::*;
    use ResourceType::*;

    let card = |color, count| CardRequirement::new(color, None, count);
    let mut leaders = Vec::with_capacity(16);
    let mut push = |requirement, effect| {
        let id = LeaderId::new(u32::try_from(leaders.len()).unwrap_or(u32::MAX));
        leaders.push(Leader::new(id, requirement, effect));
    };

    for (a, b, kind) in [
        (Yellow, Green, Servant),
        (Blue, Purple, Shield),
        (Green, Blue, Stone),
        (Yellow, Purple, Coin),
    ] {
        push(
            LeaderRequirement::cards(&[card(a, 1), card(b, 1)]),
            Effect::discount(&[Resource::new(kind, 1)]),
        );
    }

    for (need, kind) in [(Coin, Stone), (Stone, Servant), (Servant, Shield), (Shield, Coin)] {
        push(
            LeaderRequirement::resources(&[Resource::new(need, 5)]),
            Effect::depot(kind, 2),
        );
    }

    for (two, one, kind) in [
        (Yellow, Blue, Servant),
        (Green, Purple, Shield),
        (Blue, Yellow, Stone),
        (Purple, Green, Coin),
    ] {
        push(
            LeaderRequirement::cards(&[card(two, 2), card(one, 1)]),
            Effect::marble(&[Resource::new(kind, 1)]),
        );
    }

    for (color, kind) in [(Yellow, Shield), (Blue, Servant), (Purple, Stone), (Green, Coin)] {
        push(
            LeaderRequirement::cards(&[CardRequirement::new(color, Some(2), 1)]),
            Effect::production(&[Resource::new(kind, 1)], &[Resource::any(1), Resource::faith(1)]),
        );
    }

    leaders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectKind;

    #[test]
    fn test_standard_leaders() {
        let leaders = standard_leaders();
        assert_eq!(leaders.len(), 16);

        for kind in [EffectKind::Discount, EffectKind::Depot, EffectKind::Marble, EffectKind::Production] {
            assert_eq!(leaders.iter().filter(|l| l.effect.kind() == kind).count(), 4);
        }

        let mut ids: Vec<_> = leaders.iter().map(|l| l.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    #[test]
    fn test_leader_id_display() {
        assert_eq!(LeaderId::new(7).to_string(), "Leader(7)");
    }
}
