//! A player's cards: leaders in hand or in play, development slots, and
//! which productions have been used in the current production action.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::development::DevelopmentCard;
use super::leader::{Leader, LeaderId, LeaderRequirement};
use super::slots::CardSlots;
use crate::core::{EngineError, Result};
use crate::effects::{Effect, EffectKind, EffectResolver, Production};
use crate::resources::ResourceManager;

/// A leader held by a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderState {
    pub leader: Leader,
    pub active: bool,
}

/// A production a player can start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductionSource {
    Base,
    Slot(usize),
    Leader(LeaderId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardManager {
    leaders: Vec<LeaderState>,
    slots: CardSlots,
    base_production: Production,
    used: FxHashSet<ProductionSource>,
}

impl CardManager {
    #[must_use]
    pub fn new(leaders: Vec<Leader>, slot_count: usize) -> Self {
        Self {
            leaders: leaders
                .into_iter()
                .map(|leader| LeaderState { leader, active: false })
                .collect(),
            slots: CardSlots::new(slot_count),
            base_production: Production::base(),
            used: FxHashSet::default(),
        }
    }

    /// Rebuild a hand part way through a match.
    ///
    /// The standing effects of active leaders are attached to `resources`,
    /// which must not carry any yet. Leader depots are attached in
    /// `depot_order`, which names every active depot leader once.
    pub fn resume(
        leaders: Vec<LeaderState>,
        slots: CardSlots,
        used: &[ProductionSource],
        depot_order: &[LeaderId],
        resources: &mut ResourceManager,
    ) -> Result<Self> {
        let invalid = |reason: String| Err(EngineError::Snapshot(reason));
        let mut seen = FxHashSet::default();
        if let Some(state) = leaders.iter().find(|s| !seen.insert(s.leader.id)) {
            return invalid(format!("{} held twice", state.leader.id));
        }

        let is_depot = |s: &LeaderState| s.active && s.leader.effect.kind() == EffectKind::Depot;
        let mut expected: Vec<LeaderId> = leaders.iter().filter(|s| is_depot(*s)).map(|s| s.leader.id).collect();
        let mut order = depot_order.to_vec();
        expected.sort_unstable();
        order.sort_unstable();
        if expected != order {
            return invalid(format!("leader depots {order:?} do not match active depot leaders {expected:?}"));
        }

        for state in leaders.iter().filter(|s| s.active && !is_depot(*s)) {
            EffectResolver::attach(&state.leader.effect, state.leader.id, resources);
        }
        for id in depot_order {
            if let Some(state) = leaders.iter().find(|s| s.leader.id == *id) {
                EffectResolver::attach(&state.leader.effect, state.leader.id, resources);
            }
        }

        let mut cards = Self {
            leaders,
            slots,
            base_production: Production::base(),
            used: FxHashSet::default(),
        };
        for &source in used {
            cards.production(source)?;
            cards.mark_production_used(source)?;
        }
        Ok(cards)
    }

    #[must_use]
    pub fn leaders(&self) -> &[LeaderState] {
        &self.leaders
    }

    pub fn leader(&self, index: usize) -> Result<&LeaderState> {
        self.leaders.get(index).ok_or(EngineError::InvalidLeader(index))
    }

    #[must_use]
    pub fn slots(&self) -> &CardSlots {
        &self.slots
    }

    /// Active marble effects, by leader index.
    pub fn marble_effects(&self) -> impl Iterator<Item = (usize, &Effect)> {
        self.leaders
            .iter()
            .enumerate()
            .filter(|(_, l)| l.active && l.leader.effect.kind() == EffectKind::Marble)
            .map(|(i, l)| (i, &l.leader.effect))
    }

    #[must_use]
    pub fn marble_effect_count(&self) -> usize {
        self.marble_effects().count()
    }

    /// Drop a leader during setup. No faith is granted.
    pub fn discard_leader_setup(&mut self, index: usize) -> Result<Leader> {
        if index >= self.leaders.len() {
            return Err(EngineError::InvalidLeader(index));
        }
        Ok(self.leaders.remove(index).leader)
    }

    /// Check the requirement and make the leader's effect live.
    pub fn activate_leader(&mut self, index: usize, resources: &mut ResourceManager) -> Result<()> {
        let state = self.leader(index)?;
        if state.active {
            return Err(EngineError::LeaderAlreadyActive(index));
        }
        match &state.leader.requirement {
            LeaderRequirement::Resources(needed) => {
                resources.can_i_afford(needed, false)?;
            }
            LeaderRequirement::Cards(needed) => {
                let met = needed
                    .iter()
                    .all(|r| self.slots.count_matching(r.color, r.level) >= r.count);
                if !met {
                    return Err(EngineError::NotEnoughRequirement);
                }
            }
        }

        let state = &mut self.leaders[index];
        state.active = true;
        EffectResolver::attach(&state.leader.effect, state.leader.id, resources);
        info!(leader = %state.leader.id, "leader activated");
        Ok(())
    }

    /// Remove a leader from play or hand, withdrawing its effect.
    pub fn discard_leader(&mut self, index: usize, resources: &mut ResourceManager) -> Result<Leader> {
        let state = self.leader(index)?.clone();
        if state.active {
            EffectResolver::detach(&state.leader.effect, state.leader.id, resources);
        }
        self.leaders.remove(index);
        info!(leader = %state.leader.id, active = state.active, "leader discarded");
        Ok(state.leader)
    }

    // === Development cards ===

    #[must_use]
    pub fn can_place(&self, slot: usize, card: &DevelopmentCard) -> bool {
        self.slots.can_place(slot, card)
    }

    pub fn place_card(&mut self, slot: usize, card: DevelopmentCard) -> Result<()> {
        self.slots.place(slot, card)
    }

    // === Productions ===

    /// The recipe behind `source`, if the player has it.
    pub fn production(&self, source: ProductionSource) -> Result<&Production> {
        match source {
            ProductionSource::Base => Ok(&self.base_production),
            ProductionSource::Slot(slot) => self
                .slots
                .top(slot)
                .map(|c| &c.production)
                .ok_or(EngineError::InvalidCardSlot(slot)),
            ProductionSource::Leader(id) => {
                let (index, state) = self
                    .leaders
                    .iter()
                    .enumerate()
                    .find(|(_, l)| l.leader.id == id)
                    .ok_or(EngineError::InvalidLeader(id.raw() as usize))?;
                match &state.leader.effect {
                    Effect::Production(production) if state.active => Ok(production),
                    _ => Err(EngineError::WrongLeaderEffect(index)),
                }
            }
        }
    }

    #[must_use]
    pub fn is_production_used(&self, source: ProductionSource) -> bool {
        self.used.contains(&source)
    }

    pub fn mark_production_used(&mut self, source: ProductionSource) -> Result<()> {
        if !self.used.insert(source) {
            return Err(EngineError::ProductionAlreadyUsed);
        }
        Ok(())
    }

    /// Productions used in the current action, in a stable order.
    #[must_use]
    pub fn used_productions(&self) -> Vec<ProductionSource> {
        let mut used: Vec<_> = self.used.iter().copied().collect();
        used.sort_unstable();
        used
    }

    #[must_use]
    pub fn any_production_used(&self) -> bool {
        !self.used.is_empty()
    }

    pub fn reset_productions(&mut self) {
        self.used.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardColor, CardRequirement, DevelopmentCardId};
    use crate::resources::{Resource, ResourceType};

    fn leaders() -> Vec<Leader> {
        vec![
            Leader::new(
                LeaderId::new(0),
                LeaderRequirement::resources(&[Resource::coin(5)]),
                Effect::depot(ResourceType::Stone, 2),
            ),
            Leader::new(
                LeaderId::new(1),
                LeaderRequirement::cards(&[CardRequirement::new(CardColor::Blue, None, 1)]),
                Effect::marble(&[Resource::servant(1)]),
            ),
            Leader::new(
                LeaderId::new(2),
                LeaderRequirement::resources(&[]),
                Effect::production(&[Resource::shield(1)], &[Resource::any(1)]),
            ),
        ]
    }

    #[test]
    fn test_activate_needs_resources() {
        let mut cards = CardManager::new(leaders(), 3);
        let mut rm = ResourceManager::new(&[1, 2, 3]);

        assert_eq!(cards.activate_leader(0, &mut rm), Err(EngineError::NotEnoughRequirement));

        rm.add_to_strongbox(Resource::coin(5)).unwrap();
        cards.activate_leader(0, &mut rm).unwrap();

        assert!(cards.leader(0).unwrap().active);
        assert_eq!(rm.warehouse().leader_depot_count(), 1);
        // Requirement is checked, not paid.
        assert_eq!(rm.strongbox().get(ResourceType::Coin), 5);
        assert_eq!(cards.activate_leader(0, &mut rm), Err(EngineError::LeaderAlreadyActive(0)));
    }

    #[test]
    fn test_activate_needs_cards() {
        let mut cards = CardManager::new(leaders(), 3);
        let mut rm = ResourceManager::new(&[1, 2, 3]);

        assert!(cards.activate_leader(1, &mut rm).is_err());
        assert_eq!(cards.marble_effect_count(), 0);

        let card = DevelopmentCard::new(
            DevelopmentCardId::new(9),
            1,
            CardColor::Blue,
            &[Resource::coin(1)],
            Production::base(),
        );
        cards.place_card(0, card).unwrap();
        cards.activate_leader(1, &mut rm).unwrap();

        assert_eq!(cards.marble_effect_count(), 1);
    }

    #[test]
    fn test_discard_active_leader_detaches() {
        let mut cards = CardManager::new(leaders(), 3);
        let mut rm = ResourceManager::new(&[1, 2, 3]);
        rm.add_to_strongbox(Resource::coin(5)).unwrap();
        cards.activate_leader(0, &mut rm).unwrap();

        let discarded = cards.discard_leader(0, &mut rm).unwrap();

        assert_eq!(discarded.id, LeaderId::new(0));
        assert_eq!(rm.warehouse().leader_depot_count(), 0);
        assert_eq!(cards.leaders().len(), 2);
        assert_eq!(cards.discard_leader(5, &mut rm), Err(EngineError::InvalidLeader(5)));
    }

    #[test]
    fn test_production_sources() {
        let mut cards = CardManager::new(leaders(), 3);
        let mut rm = ResourceManager::new(&[1, 2, 3]);

        assert_eq!(cards.production(ProductionSource::Base).unwrap(), &Production::base());
        assert_eq!(
            cards.production(ProductionSource::Slot(0)),
            Err(EngineError::InvalidCardSlot(0))
        );
        // Inactive production leader.
        assert_eq!(
            cards.production(ProductionSource::Leader(LeaderId::new(2))),
            Err(EngineError::WrongLeaderEffect(2))
        );
        cards.activate_leader(2, &mut rm).unwrap();
        assert!(cards.production(ProductionSource::Leader(LeaderId::new(2))).is_ok());
        assert_eq!(
            cards.production(ProductionSource::Leader(LeaderId::new(0))),
            Err(EngineError::WrongLeaderEffect(0))
        );
    }

    #[test]
    fn test_production_used_once() {
        let mut cards = CardManager::new(leaders(), 3);

        cards.mark_production_used(ProductionSource::Base).unwrap();
        assert_eq!(
            cards.mark_production_used(ProductionSource::Base),
            Err(EngineError::ProductionAlreadyUsed)
        );
        assert!(cards.any_production_used());

        cards.reset_productions();
        assert!(!cards.is_production_used(ProductionSource::Base));
    }

    #[test]
    fn test_setup_discard() {
        let mut cards = CardManager::new(leaders(), 3);
        cards.discard_leader_setup(1).unwrap();

        assert_eq!(cards.leaders().len(), 2);
        assert_eq!(cards.leader(1).unwrap().leader.id, LeaderId::new(2));
    }

    #[test]
    fn test_resume_reattaches_effects() {
        let mut hand: Vec<LeaderState> =
            leaders().into_iter().map(|leader| LeaderState { leader, active: true }).collect();
        hand[1].active = false;
        let mut rm = ResourceManager::new(&[1, 2, 3]);

        let cards = CardManager::resume(
            hand.clone(),
            CardSlots::new(3),
            &[ProductionSource::Base, ProductionSource::Leader(LeaderId::new(2))],
            &[LeaderId::new(0)],
            &mut rm,
        )
        .unwrap();

        assert_eq!(rm.warehouse().leader_depot_count(), 1);
        assert_eq!(
            cards.used_productions(),
            vec![ProductionSource::Base, ProductionSource::Leader(LeaderId::new(2))]
        );

        // The active depot leader must own a depot.
        let mut rm = ResourceManager::new(&[1, 2, 3]);
        let err = CardManager::resume(hand.clone(), CardSlots::new(3), &[], &[], &mut rm).unwrap_err();
        assert!(matches!(err, EngineError::Snapshot(_)));

        // Productions must exist to have been used.
        let mut rm = ResourceManager::new(&[1, 2, 3]);
        let used = [ProductionSource::Slot(0)];
        let err = CardManager::resume(hand, CardSlots::new(3), &used, &[LeaderId::new(0)], &mut rm).unwrap_err();
        assert_eq!(err, EngineError::InvalidCardSlot(0));
    }
}
