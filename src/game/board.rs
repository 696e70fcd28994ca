//! A player's personal board.

use serde::{Deserialize, Serialize};

use crate::cards::{CardManager, Leader};
use crate::core::MatchConfig;
use crate::faith::FaithTrack;
use crate::resources::ResourceManager;

/// A development card chosen but not yet paid for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPurchase {
    pub row: usize,
    pub col: usize,
    pub slot: usize,
}

/// Storage, cards and faith of one seat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonalBoard {
    pub resources: ResourceManager,
    pub cards: CardManager,
    pub faith: FaithTrack,
    pub pending_purchase: Option<PendingPurchase>,
}

impl PersonalBoard {
    #[must_use]
    pub fn new(config: &MatchConfig, leaders: Vec<Leader>) -> Self {
        Self {
            resources: ResourceManager::new(&config.depot_capacities),
            cards: CardManager::new(leaders, config.card_slots),
            faith: FaithTrack::new(config.faith_track_length),
            pending_purchase: None,
        }
    }

    /// Move tallied faith onto the track. Returns the steps taken.
    pub fn settle_faith(&mut self) -> u32 {
        self.resources.apply_faith_points(&mut self.faith)
    }

    /// Forget the action in progress.
    pub fn abandon_action(&mut self) {
        self.resources.restore();
        self.cards.reset_productions();
        self.pending_purchase = None;
    }
}
