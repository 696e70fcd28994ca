//! Per-player resource manager.
//!
//! Owns the warehouse, the strongbox and the transient state of the action
//! in progress:
//!
//! - **buffer**: resources "in hand". During a market action it holds what
//!   was drawn and must be placed; while paying a cost it holds what must
//!   still be removed from storage. An action is not complete until the
//!   buffer is empty.
//! - **owed wildcards**: the ANY part of a staged cost or production profit,
//!   waiting for the player to name concrete kinds.
//! - **production queue**: profits accumulated during a production action,
//!   committed by [`ResourceManager::do_production`].
//! - **faith tally**: faith drawn or produced, applied to the track by
//!   [`ResourceManager::apply_faith_points`].
//!
//! Each call is atomic on its own. Multi-step sequences (take from buffer,
//! then store) are rolled back by the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::depot::Warehouse;
use super::resource::{checked_total, Resource, ResourceBag, ResourceType};
use crate::cards::LeaderId;
use crate::core::{ConversionFault, EngineError, Result};
use crate::faith::FaithTrack;

/// How a cost would be paid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Affordability {
    /// Concrete resources to remove from storage, discounts already applied.
    pub concrete: ResourceBag,
    /// Wildcard amount still to be named by the player.
    pub any: u32,
    /// Discount consumed by this cost.
    pub discount_applied: ResourceBag,
}

/// The per-action part of a [`ResourceManager`], as saved between intents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionState {
    pub buffer: Vec<Resource>,
    pub discount_used: Vec<Resource>,
    pub to_produce: Vec<Resource>,
    pub any_requirement: u32,
    pub any_profit: u32,
    pub faith_points: u32,
}

impl ActionState {
    /// Whether no action is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceManager {
    warehouse: Warehouse,
    strongbox: ResourceBag,
    buffer: ResourceBag,
    discounts: ResourceBag,
    discount_used: ResourceBag,
    resources_to_produce: ResourceBag,
    any_requirement: u32,
    any_profit: u32,
    faith_points: u32,
}

impl ResourceManager {
    /// Empty storage with base depots of the given capacities.
    #[must_use]
    pub fn new(depot_capacities: &[u32]) -> Self {
        Self {
            warehouse: Warehouse::new(depot_capacities),
            strongbox: ResourceBag::new(),
            buffer: ResourceBag::new(),
            discounts: ResourceBag::new(),
            discount_used: ResourceBag::new(),
            resources_to_produce: ResourceBag::new(),
            any_requirement: 0,
            any_profit: 0,
            faith_points: 0,
        }
    }

    #[must_use]
    pub fn warehouse(&self) -> &Warehouse {
        &self.warehouse
    }

    #[must_use]
    pub fn strongbox(&self) -> &ResourceBag {
        &self.strongbox
    }

    #[must_use]
    pub fn buffer(&self) -> &ResourceBag {
        &self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> u32 {
        self.buffer.total()
    }

    #[must_use]
    pub fn discounts(&self) -> &ResourceBag {
        &self.discounts
    }

    #[must_use]
    pub fn resources_to_produce(&self) -> &ResourceBag {
        &self.resources_to_produce
    }

    /// Wildcard cost still owed.
    #[must_use]
    pub fn any_requirement(&self) -> u32 {
        self.any_requirement
    }

    /// Wildcard profit still to be named.
    #[must_use]
    pub fn any_profit(&self) -> u32 {
        self.any_profit
    }

    #[must_use]
    pub fn faith_points(&self) -> u32 {
        self.faith_points
    }

    /// Discount consumed by the purchase in progress.
    #[must_use]
    pub fn discount_used(&self) -> &ResourceBag {
        &self.discount_used
    }

    #[must_use]
    pub fn action_state(&self) -> ActionState {
        ActionState {
            buffer: self.buffer.resources(),
            discount_used: self.discount_used.resources(),
            to_produce: self.resources_to_produce.resources(),
            any_requirement: self.any_requirement,
            any_profit: self.any_profit,
            faith_points: self.faith_points,
        }
    }

    /// Reinstate a saved action. Discounts must already be attached.
    pub fn resume_action(&mut self, state: &ActionState) -> Result<()> {
        let wildcard = |resources: &[Resource], faith_ok: bool| {
            resources
                .iter()
                .map(|r| r.kind)
                .find(|k| !(k.is_concrete() || faith_ok && *k == ResourceType::Faith))
        };
        if let Some(kind) = wildcard(&state.buffer[..], false).or(wildcard(&state.to_produce[..], true)) {
            return Err(EngineError::Snapshot(format!("{kind} cannot be held mid-action")));
        }
        let discount_used: ResourceBag = state.discount_used.iter().copied().collect();
        if let Some(r) = discount_used.resources().iter().find(|r| r.amount > self.discounts.get(r.kind)) {
            return Err(EngineError::Snapshot(format!("{r} of discount used, more than granted")));
        }

        self.buffer = state.buffer.iter().copied().collect();
        self.discount_used = discount_used;
        self.resources_to_produce = state.to_produce.iter().copied().collect();
        self.any_requirement = state.any_requirement;
        self.any_profit = state.any_profit;
        self.faith_points = state.faith_points;
        Ok(())
    }

    // === Strongbox ===

    /// Store a concrete resource in the strongbox; it has no limit.
    pub fn add_to_strongbox(&mut self, resource: Resource) -> Result<()> {
        if !resource.kind.is_concrete() {
            return Err(EngineError::WildcardConversionMismatch(
                ConversionFault::NotConcrete(resource.kind),
            ));
        }
        self.strongbox.add(resource);
        debug!(%resource, "strongbox add");
        Ok(())
    }

    pub fn sub_to_strongbox(&mut self, resource: Resource) -> Result<()> {
        self.strongbox.sub(resource)?;
        debug!(%resource, "strongbox sub");
        Ok(())
    }

    // === Warehouse ===

    pub fn add_to_warehouse(&mut self, depot: usize, leader: bool, resource: Resource) -> Result<()> {
        self.warehouse.add(depot, leader, resource)?;
        debug!(depot, leader, %resource, "warehouse add");
        Ok(())
    }

    pub fn sub_to_warehouse(&mut self, depot: usize, leader: bool, resource: Resource) -> Result<()> {
        self.warehouse.sub(depot, leader, resource)?;
        debug!(depot, leader, %resource, "warehouse sub");
        Ok(())
    }

    pub fn switch_resource_from_depot_to_depot(
        &mut self,
        from: usize,
        from_leader: bool,
        to: usize,
        to_leader: bool,
    ) -> Result<()> {
        self.warehouse.switch(from, from_leader, to, to_leader)?;
        debug!(from, from_leader, to, to_leader, "depot switch");
        Ok(())
    }

    pub fn add_leader_depot(&mut self, leader: LeaderId, kind: ResourceType, capacity: u32) {
        self.warehouse.add_leader_depot(leader, kind, capacity);
    }

    /// Withdraw a leader depot; its contents are lost.
    pub fn remove_leader_depot(&mut self, leader: LeaderId) -> Option<Resource> {
        self.warehouse.remove_leader_depot(leader)
    }

    // === Buffer ===

    pub fn add_to_buffer(&mut self, resource: Resource) {
        self.buffer.add(resource);
    }

    pub fn sub_to_buffer(&mut self, resource: Resource) -> Result<()> {
        self.buffer.sub(resource)
    }

    /// Resources drained from the market enter the buffer; faith is tallied.
    pub fn resource_from_market(&mut self, drawn: &ResourceBag, faith: u32) {
        self.buffer.add_bag(drawn);
        self.faith_points = self.faith_points.saturating_add(faith);
    }

    /// Drop whatever is left in the buffer, returning how many were dropped.
    pub fn discard_resources_from_market(&mut self) -> u32 {
        let dropped = self.buffer.total();
        self.buffer.clear();
        debug!(dropped, "buffer discarded");
        dropped
    }

    // === Discounts ===

    pub fn add_discount(&mut self, discount: &[Resource]) {
        self.discounts.add_all(discount);
    }

    pub fn remove_discount(&mut self, discount: &[Resource]) {
        for resource in discount {
            self.discounts.sub_saturating(*resource);
        }
    }

    // === Costs ===

    /// Everything stored, minus what the buffer already earmarks for removal.
    #[must_use]
    pub fn available(&self) -> ResourceBag {
        let mut stock = self.warehouse.totals();
        stock.add_bag(&self.strongbox);
        for resource in self.buffer.resources() {
            stock.sub_saturating(resource);
        }
        stock
    }

    /// Check whether `cost` can be paid. Never mutates.
    ///
    /// Discounts (only when buying a development card) reduce concrete
    /// entries, clipped at zero. The concrete remainder must be in stock;
    /// any ANY amount must be coverable by whatever stock is left over.
    pub fn can_i_afford(&self, cost: &[Resource], is_buy_development: bool) -> Result<Affordability> {
        let discount = if is_buy_development {
            let mut left = self.discounts.clone();
            for used in self.discount_used.resources() {
                left.sub_saturating(used);
            }
            left
        } else {
            ResourceBag::new()
        };
        self.plan(cost, &discount)
    }

    fn plan(&self, cost: &[Resource], discount: &ResourceBag) -> Result<Affordability> {
        let mut affordability = Affordability::default();
        let mut discount = discount.clone();

        for resource in cost {
            match resource.kind {
                ResourceType::Any => affordability.any += resource.amount,
                kind if kind.is_concrete() => {
                    let off = discount.sub_saturating(*resource);
                    affordability.discount_applied.add(Resource::new(kind, off));
                    affordability.concrete.add(Resource::new(kind, resource.amount - off));
                }
                _ => return Err(EngineError::NotEnoughRequirement),
            }
        }

        let mut stock = self.available();
        for needed in affordability.concrete.resources() {
            stock
                .sub(needed)
                .map_err(|_| EngineError::NotEnoughRequirement)?;
        }
        if stock.total() < affordability.any {
            return Err(EngineError::NotEnoughRequirement);
        }
        Ok(affordability)
    }

    /// Check `cost` and earmark it: the concrete part goes into the buffer
    /// for removal, the ANY part becomes owed. Returns the owed total.
    pub fn stage_requirement(&mut self, cost: &[Resource], is_buy_development: bool) -> Result<u32> {
        let plan = self.can_i_afford(cost, is_buy_development)?;
        self.buffer.add_bag(&plan.concrete);
        self.discount_used.add_bag(&plan.discount_applied);
        self.any_requirement = self.any_requirement.saturating_add(plan.any);
        debug!(any = self.any_requirement, "requirement staged");
        Ok(self.any_requirement)
    }

    /// Resolve the owed ANY cost with concrete resources.
    ///
    /// The declared amounts must sum to exactly the owed total, use only
    /// concrete kinds, and be payable from what is left in storage.
    pub fn convert_any_requirement(&mut self, declared: &[Resource], is_buy_development: bool) -> Result<()> {
        check_declaration(declared, self.any_requirement)?;
        let plan = self.can_i_afford(declared, is_buy_development)?;
        self.buffer.add_bag(&plan.concrete);
        self.discount_used.add_bag(&plan.discount_applied);
        self.any_requirement = 0;
        debug!(is_buy_development, "any requirement converted");
        Ok(())
    }

    // === Production ===

    /// Queue production profits. ANY profits become owed until converted.
    pub fn add_to_resources_to_produce(&mut self, profit: &[Resource]) {
        for resource in profit {
            if resource.kind == ResourceType::Any {
                self.any_profit = self.any_profit.saturating_add(resource.amount);
            } else {
                self.resources_to_produce.add(*resource);
            }
        }
    }

    /// Resolve the owed ANY profit with concrete resources.
    pub fn convert_any_production_profit(&mut self, declared: &[Resource]) -> Result<()> {
        check_declaration(declared, self.any_profit)?;
        self.resources_to_produce.add_all(declared);
        self.any_profit = 0;
        debug!("any profit converted");
        Ok(())
    }

    /// Commit the production queue: faith to the tally, the rest to the strongbox.
    pub fn do_production(&mut self) {
        let faith = self.resources_to_produce.take(ResourceType::Faith);
        self.faith_points = self.faith_points.saturating_add(faith);
        let produced = std::mem::take(&mut self.resources_to_produce);
        self.strongbox.add_bag(&produced);
        debug!(produced = produced.total(), faith, "production committed");
    }

    // === Faith ===

    pub fn add_faith_points(&mut self, points: u32) {
        self.faith_points = self.faith_points.saturating_add(points);
    }

    /// Move the faith track by the tallied faith and reset the tally.
    /// Returns the number of points applied.
    pub fn apply_faith_points(&mut self, track: &mut FaithTrack) -> u32 {
        let points = std::mem::take(&mut self.faith_points);
        track.move_player(points);
        points
    }

    // === Bookkeeping ===

    /// Reset every per-action field.
    pub fn restore(&mut self) {
        self.buffer.clear();
        self.discount_used.clear();
        self.resources_to_produce.clear();
        self.any_requirement = 0;
        self.any_profit = 0;
        self.faith_points = 0;
    }

    /// Stored resources (warehouse + strongbox).
    #[must_use]
    pub fn total_stored(&self) -> u32 {
        self.warehouse.total().saturating_add(self.strongbox.total())
    }

    /// Count of `kind` across warehouse and strongbox.
    #[must_use]
    pub fn count(&self, kind: ResourceType) -> u32 {
        self.warehouse.count(kind).saturating_add(self.strongbox.get(kind))
    }
}

fn check_declaration(declared: &[Resource], owed: u32) -> Result<()> {
    if let Some(bad) = declared.iter().find(|r| !r.kind.is_concrete()) {
        return Err(EngineError::WildcardConversionMismatch(
            ConversionFault::NotConcrete(bad.kind),
        ));
    }
    match checked_total(declared) {
        Some(total) if total == owed => Ok(()),
        total => Err(EngineError::WildcardConversionMismatch(ConversionFault::Total {
            owed,
            declared: total.unwrap_or(u32::MAX),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Strongbox {coin 5, servant 3, stone 2}, depot 0 coin 1, depot 1 shield 1.
    fn stocked() -> ResourceManager {
        let mut rm = ResourceManager::new(&[1, 2, 3]);
        rm.add_to_strongbox(Resource::coin(5)).unwrap();
        rm.add_to_strongbox(Resource::servant(3)).unwrap();
        rm.add_to_strongbox(Resource::stone(2)).unwrap();
        rm.add_to_warehouse(0, false, Resource::coin(1)).unwrap();
        rm.add_to_warehouse(1, false, Resource::shield(1)).unwrap();
        rm.restore();
        rm
    }

    #[test]
    fn test_strongbox_sub_scenario() {
        let mut rm = ResourceManager::new(&[1, 2, 3]);
        rm.add_to_strongbox(Resource::coin(5)).unwrap();

        rm.sub_to_strongbox(Resource::coin(3)).unwrap();
        assert_eq!(rm.strongbox().get(ResourceType::Coin), 2);

        assert_eq!(
            rm.sub_to_strongbox(Resource::coin(10)),
            Err(EngineError::NegativeResource { resource: ResourceType::Coin })
        );
        assert_eq!(rm.strongbox().get(ResourceType::Coin), 2);
    }

    #[test]
    fn test_strongbox_rejects_wildcards() {
        let mut rm = ResourceManager::new(&[1, 2, 3]);
        assert!(rm.add_to_strongbox(Resource::any(2)).is_err());
        assert!(rm.strongbox().is_empty());
    }

    #[test]
    fn test_can_i_afford_with_discount() {
        let mut rm = stocked();
        rm.add_discount(&[Resource::coin(1)]);

        let cost = [Resource::coin(7), Resource::servant(3), Resource::stone(1)];
        let plan = rm.can_i_afford(&cost, true).unwrap();
        assert_eq!(plan.concrete.get(ResourceType::Coin), 6);

        // Without the discount the seventh coin is missing.
        assert_eq!(rm.can_i_afford(&cost, false), Err(EngineError::NotEnoughRequirement));
    }

    #[test]
    fn test_can_i_afford_any_uses_leftover_stock() {
        let rm = stocked();

        let plan = rm.can_i_afford(&[Resource::stone(1), Resource::any(2)], false).unwrap();
        assert_eq!(plan.any, 2);

        // 12 stored, 1 stone taken, 11 left for the wildcard.
        assert!(rm.can_i_afford(&[Resource::stone(1), Resource::any(11)], false).is_ok());
        assert!(rm.can_i_afford(&[Resource::stone(1), Resource::any(12)], false).is_err());
    }

    #[test]
    fn test_can_i_afford_missing_concrete() {
        let rm = stocked();
        let cost = [Resource::stone(1), Resource::coin(10)];
        assert_eq!(rm.can_i_afford(&cost, false), Err(EngineError::NotEnoughRequirement));
    }

    #[test]
    fn test_can_i_afford_is_pure() {
        let rm = stocked();
        let before = rm.clone();
        let _ = rm.can_i_afford(&[Resource::any(3), Resource::coin(2)], true);
        assert_eq!(rm, before);
    }

    #[test]
    fn test_convert_any_requirement() {
        let mut rm = stocked();
        let wildcard = [Resource::any(2)];
        let concrete = [Resource::coin(1), Resource::stone(1)];

        // Nothing owed yet.
        assert!(rm.convert_any_requirement(&wildcard, true).is_err());
        assert!(rm.convert_any_requirement(&concrete, true).is_err());

        rm.stage_requirement(&wildcard, false).unwrap();
        assert_eq!(rm.any_requirement(), 2);
        assert!(matches!(
            rm.convert_any_requirement(&wildcard, false),
            Err(EngineError::WildcardConversionMismatch(ConversionFault::NotConcrete(
                ResourceType::Any
            )))
        ));
        rm.convert_any_requirement(&concrete, false).unwrap();

        assert_eq!(rm.any_requirement(), 0);
        assert_eq!(rm.buffer().get(ResourceType::Coin), 1);
        assert_eq!(rm.buffer().get(ResourceType::Stone), 1);
    }

    #[test]
    fn test_convert_any_requirement_wrong_total() {
        let mut rm = stocked();
        rm.stage_requirement(&[Resource::any(2), Resource::any(5)], false).unwrap();

        let err = rm
            .convert_any_requirement(&[Resource::coin(1), Resource::stone(4)], false)
            .unwrap_err();

        assert_eq!(
            err,
            EngineError::WildcardConversionMismatch(ConversionFault::Total { owed: 7, declared: 5 })
        );
        assert_eq!(rm.any_requirement(), 7);
    }

    #[test]
    fn test_convert_any_requirement_must_be_in_stock() {
        let mut rm = stocked();
        rm.stage_requirement(&[Resource::any(3)], false).unwrap();

        assert_eq!(
            rm.convert_any_requirement(&[Resource::shield(3)], false),
            Err(EngineError::NotEnoughRequirement)
        );
    }

    #[test]
    fn test_staged_costs_accumulate_against_stock() {
        let mut rm = stocked();
        rm.stage_requirement(&[Resource::stone(2)], false).unwrap();

        // Both stones are already earmarked.
        assert_eq!(
            rm.stage_requirement(&[Resource::stone(1)], false),
            Err(EngineError::NotEnoughRequirement)
        );
        assert_eq!(rm.buffer().get(ResourceType::Stone), 2);
    }

    #[test]
    fn test_discount_applies_once_per_purchase() {
        let mut rm = stocked();
        rm.add_discount(&[Resource::coin(1)]);

        rm.stage_requirement(&[Resource::coin(2), Resource::any(1)], true).unwrap();
        assert_eq!(rm.buffer().get(ResourceType::Coin), 1);

        rm.convert_any_requirement(&[Resource::coin(1)], true).unwrap();
        assert_eq!(rm.buffer().get(ResourceType::Coin), 2);
    }

    #[test]
    fn test_remove_discount() {
        let mut rm = stocked();
        rm.add_discount(&[Resource::coin(1)]);
        rm.remove_discount(&[Resource::coin(1)]);
        assert!(rm.discounts().is_empty());
    }

    #[test]
    fn test_convert_any_production_profit() {
        let mut rm = stocked();
        let wildcard = [Resource::any(2)];
        let concrete = [Resource::coin(1), Resource::stone(1)];

        assert!(rm.convert_any_production_profit(&wildcard).is_err());
        assert!(rm.convert_any_production_profit(&concrete).is_err());

        rm.add_to_resources_to_produce(&wildcard);
        assert_eq!(rm.any_profit(), 2);
        rm.convert_any_production_profit(&concrete).unwrap();

        assert_eq!(rm.any_profit(), 0);
        assert_eq!(rm.resources_to_produce().total(), 2);
    }

    #[test]
    fn test_faith_cannot_replace_wildcard() {
        let mut rm = stocked();
        rm.add_to_resources_to_produce(&[Resource::any(1)]);
        assert!(matches!(
            rm.convert_any_production_profit(&[Resource::faith(1)]),
            Err(EngineError::WildcardConversionMismatch(ConversionFault::NotConcrete(
                ResourceType::Faith
            )))
        ));
    }

    #[test]
    fn test_profit_declaration_overflow_rejected() {
        let mut rm = stocked();
        let strongbox = rm.strongbox().clone();
        rm.add_to_resources_to_produce(&[Resource::any(1)]);

        let err = rm
            .convert_any_production_profit(&[Resource::coin(u32::MAX), Resource::stone(2)])
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::WildcardConversionMismatch(ConversionFault::Total {
                owed: 1,
                declared: u32::MAX,
            })
        );
        assert_eq!(rm.any_profit(), 1);

        rm.do_production();
        assert_eq!(rm.strongbox(), &strongbox);
    }

    #[test]
    fn test_requirement_declaration_overflow_rejected() {
        let mut rm = stocked();
        rm.stage_requirement(&[Resource::any(1)], false).unwrap();

        let declared = [Resource::stone(u32::MAX), Resource::stone(2)];
        assert!(rm.convert_any_requirement(&declared, false).is_err());
        assert_eq!(rm.any_requirement(), 1);
        assert_eq!(rm.buffer_size(), 0);
    }

    #[test]
    fn test_action_state_resumes() {
        let mut rm = stocked();
        rm.add_discount(&[Resource::coin(1)]);
        rm.stage_requirement(&[Resource::coin(2), Resource::any(1)], true).unwrap();
        rm.add_faith_points(2);
        let state = rm.action_state();
        assert!(!state.is_idle());

        let mut back = stocked();
        back.add_discount(&[Resource::coin(1)]);
        back.resume_action(&state).unwrap();

        assert_eq!(back, rm);
    }

    #[test]
    fn test_action_state_rejects_wildcards_and_unknown_discounts() {
        let mut rm = stocked();
        let wild = ActionState {
            buffer: vec![Resource::any(1)],
            ..ActionState::default()
        };
        assert!(matches!(rm.resume_action(&wild), Err(EngineError::Snapshot(_))));

        let faith_queued = ActionState {
            to_produce: vec![Resource::faith(1)],
            ..ActionState::default()
        };
        assert!(rm.resume_action(&faith_queued).is_ok());

        let discounted = ActionState {
            discount_used: vec![Resource::stone(1)],
            ..ActionState::default()
        };
        assert!(rm.resume_action(&discounted).is_err());
    }

    #[test]
    fn test_do_production() {
        let mut rm = stocked();
        rm.add_to_resources_to_produce(&[Resource::coin(5), Resource::faith(2)]);

        rm.do_production();

        assert_eq!(rm.strongbox().get(ResourceType::Coin), 10);
        assert_eq!(rm.faith_points(), 2);
        assert!(rm.resources_to_produce().is_empty());
    }

    #[test]
    fn test_apply_faith_points() {
        let mut rm = stocked();
        let mut track = FaithTrack::new(24);
        rm.add_faith_points(3);

        assert_eq!(rm.apply_faith_points(&mut track), 3);
        assert_eq!(track.position(), 3);
        assert_eq!(rm.faith_points(), 0);
    }

    #[test]
    fn test_buffer() {
        let mut rm = stocked();
        assert_eq!(rm.buffer_size(), 0);
        assert!(rm.sub_to_buffer(Resource::stone(1)).is_err());

        rm.add_to_buffer(Resource::stone(1));
        assert!(rm.sub_to_buffer(Resource::stone(1)).is_ok());
        assert_eq!(rm.buffer_size(), 0);
    }

    #[test]
    fn test_market_resources_discarded() {
        let mut rm = stocked();
        let drawn: ResourceBag = [Resource::coin(2), Resource::shield(1)].into_iter().collect();
        rm.resource_from_market(&drawn, 1);

        assert_eq!(rm.discard_resources_from_market(), 3);
        assert_eq!(rm.buffer_size(), 0);
        assert_eq!(rm.faith_points(), 1);
        assert_eq!(rm.total_stored(), 12);
    }
}
