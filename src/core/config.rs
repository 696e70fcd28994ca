//! Match configuration.
//!
//! A match is configured once at creation by a `MatchConfig`. The default
//! value is the standard game: a 3×4 marble market, depots of capacity
//! 1, 2 and 3, a 24-space faith track with three vatican reports, four
//! leaders dealt and two kept per player.
//!
//! ```
//! use renaissance_core::core::MatchConfig;
//!
//! let config = MatchConfig::new(3).with_seed(11);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.market_rows * config.market_cols + 1, config.marble_count());
//! ```

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};
use crate::faith::VaticanReport;
use crate::market::Marble;

/// What a seat receives at setup, before its first turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupBonus {
    /// Resources of the player's choice (declared in `SetupResource`).
    pub resources: u32,
    /// Starting faith steps.
    pub faith: u32,
}

impl SetupBonus {
    #[must_use]
    pub const fn new(resources: u32, faith: u32) -> Self {
        Self { resources, faith }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of seats (1-4).
    pub player_count: usize,

    /// Seed for every shuffle performed at match creation.
    pub seed: u64,

    pub market_rows: usize,
    pub market_cols: usize,

    /// Marble multiset laid out in the market (grid plus spare).
    pub marbles: Vec<(Marble, u32)>,

    /// Capacities of the base warehouse depots, in order.
    pub depot_capacities: Vec<u32>,

    /// Last space of the faith track.
    pub faith_track_length: u32,

    /// Vatican report sections, in track order.
    pub vatican_reports: Vec<VaticanReport>,

    /// Leaders dealt to each player at setup.
    pub leaders_dealt: usize,

    /// Leaders a player keeps after the setup discard.
    pub leaders_kept: usize,

    /// Setup bonus by seat; seats past the end get nothing.
    pub setup_bonuses: Vec<SetupBonus>,

    /// Personal development card slots.
    pub card_slots: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            seed: 0,
            market_rows: 3,
            market_cols: 4,
            marbles: vec![
                (Marble::White, 4),
                (Marble::Blue, 2),
                (Marble::Grey, 2),
                (Marble::Yellow, 2),
                (Marble::Purple, 2),
                (Marble::Red, 1),
            ],
            depot_capacities: vec![1, 2, 3],
            faith_track_length: 24,
            vatican_reports: vec![
                VaticanReport::new(5, 8),
                VaticanReport::new(12, 16),
                VaticanReport::new(19, 24),
            ],
            leaders_dealt: 4,
            leaders_kept: 2,
            setup_bonuses: vec![
                SetupBonus::new(0, 0),
                SetupBonus::new(1, 0),
                SetupBonus::new(1, 1),
                SetupBonus::new(2, 1),
            ],
            card_slots: 3,
        }
    }
}

impl MatchConfig {
    /// Standard configuration for `player_count` players.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the market layout. `marbles` must hold `rows * cols + 1` marbles.
    #[must_use]
    pub fn with_market(mut self, rows: usize, cols: usize, marbles: Vec<(Marble, u32)>) -> Self {
        self.market_rows = rows;
        self.market_cols = cols;
        self.marbles = marbles;
        self
    }

    #[must_use]
    pub fn with_depot_capacities(mut self, capacities: Vec<u32>) -> Self {
        self.depot_capacities = capacities;
        self
    }

    #[must_use]
    pub fn with_leaders(mut self, dealt: usize, kept: usize) -> Self {
        self.leaders_dealt = dealt;
        self.leaders_kept = kept;
        self
    }

    #[must_use]
    pub fn with_setup_bonuses(mut self, bonuses: Vec<SetupBonus>) -> Self {
        self.setup_bonuses = bonuses;
        self
    }

    /// Total marbles in the market, spare included.
    #[must_use]
    pub fn marble_count(&self) -> usize {
        self.marbles.iter().map(|(_, n)| *n as usize).sum()
    }

    /// Setup bonus for the seat at `position`.
    #[must_use]
    pub fn setup_bonus(&self, position: usize) -> SetupBonus {
        self.setup_bonuses.get(position).copied().unwrap_or_default()
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        if !(1..=4).contains(&self.player_count) {
            return Err(EngineError::InvalidConfig(format!(
                "player count must be 1-4, got {}",
                self.player_count
            )));
        }
        if self.market_rows == 0 || self.market_cols == 0 {
            return Err(EngineError::InvalidConfig("market must have at least one cell".into()));
        }
        let expected = self.market_rows * self.market_cols + 1;
        if self.marble_count() != expected {
            return Err(EngineError::InvalidConfig(format!(
                "market needs {} marbles, {} configured",
                expected,
                self.marble_count()
            )));
        }
        if self.depot_capacities.iter().any(|&c| c == 0) {
            return Err(EngineError::InvalidConfig("depot capacity must be positive".into()));
        }
        if self.leaders_kept > self.leaders_dealt {
            return Err(EngineError::InvalidConfig(format!(
                "cannot keep {} of {} leaders",
                self.leaders_kept, self.leaders_dealt
            )));
        }
        let mut last = 0;
        for report in &self.vatican_reports {
            if report.first_space > report.pope_space
                || report.pope_space > self.faith_track_length
                || report.first_space <= last
            {
                return Err(EngineError::InvalidConfig(format!(
                    "vatican report {}..={} is out of order",
                    report.first_space, report.pope_space
                )));
            }
            last = report.pope_space;
        }
        if self.card_slots == 0 {
            return Err(EngineError::InvalidConfig("at least one card slot is required".into()));
        }
        Ok(())
    }
}
