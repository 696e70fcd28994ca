//! Depots and the warehouse.
//!
//! A depot is a fixed-capacity slot holding at most one resource kind.
//! The warehouse is the ordered list of base depots (capacities 1, 2, 3 in
//! the standard game) plus any leader depots granted by active leaders.
//!
//! ## Invariants
//!
//! - `amount <= capacity` for every depot
//! - a non-empty depot holds a single concrete kind
//! - two base depots never hold the same kind
//! - a leader depot only ever holds the kind it was created for
//!
//! Every mutating call validates first and mutates last, so a failed call
//! leaves the warehouse exactly as it was.

use super::resource::{Resource, ResourceBag, ResourceType};
use crate::cards::LeaderId;
use crate::core::{ConversionFault, EngineError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Depot {
    capacity: u32,
    /// Kind fixed at creation (leader depots only).
    locked: Option<ResourceType>,
    /// Kind currently stored; `None` while empty.
    stored: Option<ResourceType>,
    amount: u32,
}

impl Depot {
    /// An empty base depot.
    #[must_use]
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            locked: None,
            stored: None,
            amount: 0,
        }
    }

    /// An empty depot that only accepts `kind`.
    #[must_use]
    pub fn locked(kind: ResourceType, capacity: u32) -> Self {
        Self {
            locked: Some(kind),
            ..Self::new(capacity)
        }
    }

    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[must_use]
    pub fn amount(&self) -> u32 {
        self.amount
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }

    /// Kind this depot is bound to: what it stores, or its locked kind.
    #[must_use]
    pub fn kind(&self) -> Option<ResourceType> {
        self.stored.or(self.locked)
    }

    /// Kind actually stored, `None` while empty.
    #[must_use]
    pub fn stored_kind(&self) -> Option<ResourceType> {
        self.stored
    }

    /// Current contents as a single resource.
    #[must_use]
    pub fn content(&self) -> Option<Resource> {
        self.stored.map(|kind| Resource::new(kind, self.amount))
    }

    /// Count held of `kind`.
    #[must_use]
    pub fn count(&self, kind: ResourceType) -> u32 {
        if self.stored == Some(kind) {
            self.amount
        } else {
            0
        }
    }

    /// Add `resource`; `index` only labels errors.
    pub fn add(&mut self, index: usize, resource: Resource) -> Result<()> {
        if !resource.kind.is_concrete() {
            return Err(EngineError::WildcardConversionMismatch(
                ConversionFault::NotConcrete(resource.kind),
            ));
        }
        if let Some(kind) = self.kind() {
            if kind != resource.kind {
                return Err(EngineError::DepotTypeMismatch {
                    depot: index,
                    stored: kind,
                    offered: resource.kind,
                });
            }
        }
        let requested = match self.amount.checked_add(resource.amount) {
            Some(n) if n <= self.capacity => n,
            sum => {
                return Err(EngineError::DepotCapacityExceeded {
                    depot: index,
                    capacity: self.capacity,
                    requested: sum.unwrap_or(u32::MAX),
                });
            }
        };
        if resource.amount > 0 {
            self.stored = Some(resource.kind);
            self.amount = requested;
        }
        Ok(())
    }

    /// Remove `resource`; `index` only labels errors.
    pub fn sub(&mut self, index: usize, resource: Resource) -> Result<()> {
        match self.kind() {
            Some(kind) if kind != resource.kind => {
                return Err(EngineError::DepotTypeMismatch {
                    depot: index,
                    stored: kind,
                    offered: resource.kind,
                });
            }
            _ => {}
        }
        if self.amount < resource.amount {
            return Err(EngineError::NegativeResource { resource: resource.kind });
        }
        self.amount -= resource.amount;
        if self.amount == 0 {
            self.stored = None;
        }
        Ok(())
    }

    /// Empty the depot, returning what it held.
    pub fn take_all(&mut self) -> Option<Resource> {
        let content = self.content();
        self.stored = None;
        self.amount = 0;
        content
    }
}

/// A depot granted by an active leader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderDepot {
    pub leader: LeaderId,
    pub depot: Depot,
}

/// Base depots plus leader depots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warehouse {
    depots: Vec<Depot>,
    leader_depots: Vec<LeaderDepot>,
}

impl Warehouse {
    /// Empty warehouse with base depots of the given capacities.
    #[must_use]
    pub fn new(capacities: &[u32]) -> Self {
        Self {
            depots: capacities.iter().map(|&c| Depot::new(c)).collect(),
            leader_depots: Vec::new(),
        }
    }

    #[must_use]
    pub fn depots(&self) -> &[Depot] {
        &self.depots
    }

    pub fn leader_depots(&self) -> impl Iterator<Item = &Depot> {
        self.leader_depots.iter().map(|ld| &ld.depot)
    }

    /// Leader depots with their owners, in activation order.
    #[must_use]
    pub fn leader_depot_entries(&self) -> &[LeaderDepot] {
        &self.leader_depots
    }

    #[must_use]
    pub fn leader_depot_count(&self) -> usize {
        self.leader_depots.len()
    }

    /// Look up a depot by index, in the base list or the leader list.
    pub fn depot(&self, index: usize, leader: bool) -> Result<&Depot> {
        let found = if leader {
            self.leader_depots.get(index).map(|ld| &ld.depot)
        } else {
            self.depots.get(index)
        };
        found.ok_or(EngineError::InvalidDepot { index, leader })
    }

    fn depot_mut(&mut self, index: usize, leader: bool) -> Result<&mut Depot> {
        let found = if leader {
            self.leader_depots.get_mut(index).map(|ld| &mut ld.depot)
        } else {
            self.depots.get_mut(index)
        };
        found.ok_or(EngineError::InvalidDepot { index, leader })
    }

    /// Whether a base depot other than `except` stores `kind`.
    fn base_holds_elsewhere(&self, kind: ResourceType, except: usize) -> bool {
        self.depots
            .iter()
            .enumerate()
            .any(|(i, d)| i != except && d.stored_kind() == Some(kind))
    }

    pub fn add(&mut self, index: usize, leader: bool, resource: Resource) -> Result<()> {
        let mut depot = self.depot(index, leader)?.clone();
        depot.add(index, resource)?;
        if !leader && self.base_holds_elsewhere(resource.kind, index) {
            return Err(EngineError::DuplicateDepotType { resource: resource.kind });
        }
        *self.depot_mut(index, leader)? = depot;
        Ok(())
    }

    pub fn sub(&mut self, index: usize, leader: bool, resource: Resource) -> Result<()> {
        self.depot_mut(index, leader)?.sub(index, resource)
    }

    /// Move depot contents around.
    ///
    /// Between two base depots the full contents are swapped. When a leader
    /// depot is involved the full contents of `from` are moved into `to`.
    /// Both depots are revalidated and neither changes on failure.
    pub fn switch(&mut self, from: usize, from_leader: bool, to: usize, to_leader: bool) -> Result<()> {
        let mut source = self.depot(from, from_leader)?.clone();
        let mut target = self.depot(to, to_leader)?.clone();
        if from == to && from_leader == to_leader {
            return Ok(());
        }

        if !from_leader && !to_leader {
            let outgoing = source.take_all();
            let incoming = target.take_all();
            if let Some(resource) = outgoing {
                target.add(to, resource)?;
            }
            if let Some(resource) = incoming {
                source.add(from, resource)?;
            }
        } else if let Some(resource) = source.take_all() {
            target.add(to, resource)?;
            if !to_leader && self.base_holds_elsewhere(resource.kind, to) {
                return Err(EngineError::DuplicateDepotType { resource: resource.kind });
            }
        }

        *self.depot_mut(from, from_leader)? = source;
        *self.depot_mut(to, to_leader)? = target;
        Ok(())
    }

    /// Grant an empty depot locked to `kind`.
    pub fn add_leader_depot(&mut self, leader: LeaderId, kind: ResourceType, capacity: u32) {
        self.leader_depots.push(LeaderDepot {
            leader,
            depot: Depot::locked(kind, capacity),
        });
    }

    /// Withdraw the depot granted by `leader`, returning its lost contents.
    pub fn remove_leader_depot(&mut self, leader: LeaderId) -> Option<Resource> {
        let pos = self.leader_depots.iter().position(|ld| ld.leader == leader)?;
        let mut removed = self.leader_depots.remove(pos);
        removed.depot.take_all()
    }

    /// Count of `kind` across every depot.
    #[must_use]
    pub fn count(&self, kind: ResourceType) -> u32 {
        self.depots.iter().map(|d| d.count(kind)).sum::<u32>()
            + self.leader_depots().map(|d| d.count(kind)).sum::<u32>()
    }

    /// Everything stored, as a bag.
    #[must_use]
    pub fn totals(&self) -> ResourceBag {
        self.depots
            .iter()
            .chain(self.leader_depots())
            .filter_map(Depot::content)
            .collect()
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.depots.iter().chain(self.leader_depots()).map(Depot::amount).sum()
    }
}
