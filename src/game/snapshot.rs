//! Versioned match snapshots for save and resume.
//!
//! A snapshot is a set of plain records, separate from the live engine
//! types: the market layout and any draw in progress, the development
//! stacks, fired vatican reports and, per seat, storage contents, leaders,
//! development slots, the faith track, the turn phase and the action in
//! progress. Action history is not kept.
//!
//! `Match::restore` rebuilds every part through the same checks the
//! engine applies while playing (depot capacity and purity, slot levels,
//! stack placement, phase consistency), so a decoded snapshot either
//! yields a playable match or an `EngineError::Snapshot`.
//!
//! ```
//! use renaissance_core::core::MatchConfig;
//! use renaissance_core::game::{Match, MatchBuilder, MatchSnapshot};
//!
//! let game = MatchBuilder::new(MatchConfig::new(3).with_seed(1)).build().unwrap();
//! let bytes = game.snapshot().encode().unwrap();
//!
//! let resumed = Match::restore(&MatchSnapshot::decode(&bytes).unwrap()).unwrap();
//! assert_eq!(resumed.snapshot(), game.snapshot());
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use super::board::{PendingPurchase, PersonalBoard};
use super::builder::DEVELOPMENT_LEVELS;
use super::engine::Match;
use crate::cards::{CardManager, CardSlots, DevelopmentCard, DevelopmentGrid, LeaderId, LeaderState, ProductionSource};
use crate::core::{EngineError, MatchConfig, PlayerId, PlayerMap, Result};
use crate::faith::{FaithTrack, FavourTile, ReportSchedule};
use crate::market::{Marble, MarbleMarket, MarketSnapshot};
use crate::resources::{ActionState, Resource, ResourceBag, ResourceManager};
use crate::rules::{TurnMachine, TurnPhase};

/// Bumped whenever the snapshot layout changes.
pub const SNAPSHOT_VERSION: u32 = 2;

/// The market grid plus the draw not yet handed to the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub layout: MarketSnapshot,
    pub pending: Vec<Resource>,
    pub faith: u32,
    pub white_drawn: u32,
    pub white_remaining: u32,
}

impl MarketRecord {
    fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.faith == 0 && self.white_drawn == 0 && self.white_remaining == 0
    }
}

/// Contents of a leader depot, in activation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderDepotRecord {
    pub leader: LeaderId,
    pub content: Option<Resource>,
}

/// The action a seat has under way.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnProgress {
    pub resources: ActionState,
    pub used_productions: Vec<ProductionSource>,
    pub pending_purchase: Option<PendingPurchase>,
}

impl TurnProgress {
    fn is_idle(&self) -> bool {
        self.resources.is_idle() && self.used_productions.is_empty() && self.pending_purchase.is_none()
    }
}

/// One seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// One entry per configured base depot.
    pub depots: Vec<Option<Resource>>,
    pub leader_depots: Vec<LeaderDepotRecord>,
    pub strongbox: Vec<Resource>,
    pub leaders: Vec<LeaderState>,
    /// Development slots, bottom card first.
    pub slots: Vec<Vec<DevelopmentCard>>,
    pub faith_position: u32,
    pub favours: Vec<FavourTile>,
    pub progress: TurnProgress,
    pub phase: TurnPhase,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub version: u32,
    pub config: MatchConfig,
    pub market: MarketRecord,
    /// Row-major development stacks, top card last.
    pub development: Vec<Vec<DevelopmentCard>>,
    pub fired_reports: Vec<bool>,
    pub players: Vec<PlayerSnapshot>,
    pub current_player: PlayerId,
}

impl MatchSnapshot {
    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| EngineError::Snapshot(e.to_string()))
    }

    /// Decode a snapshot, refusing other versions.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        // The version leads the encoding, so it can be checked before the rest.
        let version: u32 = bincode::deserialize(bytes).map_err(|e| EngineError::Snapshot(e.to_string()))?;
        if version != SNAPSHOT_VERSION {
            return Err(EngineError::Snapshot(format!(
                "unsupported snapshot version {version}, expected {SNAPSHOT_VERSION}"
            )));
        }
        bincode::deserialize(bytes).map_err(|e| EngineError::Snapshot(e.to_string()))
    }
}

fn invalid<T>(reason: String) -> Result<T> {
    Err(EngineError::Snapshot(reason))
}

impl Match {
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        let players = self
            .boards
            .iter()
            .map(|(player, board)| player_snapshot(board, self.machine.phase(player), self.machine.is_active(player)))
            .collect();
        MatchSnapshot {
            version: SNAPSHOT_VERSION,
            config: self.config.clone(),
            market: MarketRecord {
                layout: self.market.snapshot(),
                pending: self.market.pending().resources(),
                faith: self.market.faith(),
                white_drawn: self.market.white_marble_drew(),
                white_remaining: self.market.white_remaining(),
            },
            development: self.grid.stacks().to_vec(),
            fired_reports: self.reports.fired().to_vec(),
            players,
            current_player: self.machine.current_player(),
        }
    }

    /// Rebuild a match from a snapshot, checking it describes a reachable
    /// position.
    pub fn restore(snapshot: &MatchSnapshot) -> Result<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return invalid(format!("unsupported snapshot version {}", snapshot.version));
        }
        let config = &snapshot.config;
        config.validate()?;
        if snapshot.players.len() != config.player_count {
            return invalid(format!(
                "snapshot has {} players, configured for {}",
                snapshot.players.len(),
                config.player_count
            ));
        }

        let market = restore_market(config, &snapshot.market)?;
        let grid = DevelopmentGrid::from_stacks(DEVELOPMENT_LEVELS, snapshot.development.clone())?;
        let reports = ReportSchedule::resume(config.vatican_reports.clone(), snapshot.fired_reports.clone())?;

        let phases = PlayerMap::try_from(snapshot.players.iter().map(|p| p.phase).collect::<Vec<_>>())?;
        let active = PlayerMap::try_from(snapshot.players.iter().map(|p| p.active).collect::<Vec<_>>())?;
        let machine = TurnMachine::resume(phases, active, snapshot.current_player)?;

        let boards = snapshot
            .players
            .iter()
            .map(|record| restore_board(config, &grid, &reports, record))
            .collect::<Result<Vec<_>>>()?;
        let boards = PlayerMap::try_from(boards)?;

        let furthest = boards.iter().map(|(_, b)| b.faith.position()).max().unwrap_or(0);
        for (index, report) in reports.reports().iter().enumerate() {
            if reports.is_fired(index) != (furthest >= report.pope_space) {
                return invalid(format!("vatican report {index} does not match the faith tracks"));
            }
        }

        let current = machine.phase(snapshot.current_player);
        let converting = current == TurnPhase::WhiteMarbleConversion;
        if converting != (market.white_remaining() > 0) || (!converting && !snapshot.market.is_idle()) {
            return invalid(format!("market draw in progress does not match {current:?}"));
        }

        info!(
            players = config.player_count,
            current = %snapshot.current_player,
            "match restored"
        );
        Ok(Match {
            config: config.clone(),
            market,
            grid,
            boards,
            machine,
            reports,
        })
    }
}

fn player_snapshot(board: &PersonalBoard, phase: TurnPhase, active: bool) -> PlayerSnapshot {
    let warehouse = board.resources.warehouse();
    PlayerSnapshot {
        depots: warehouse.depots().iter().map(|d| d.content()).collect(),
        leader_depots: warehouse
            .leader_depot_entries()
            .iter()
            .map(|ld| LeaderDepotRecord {
                leader: ld.leader,
                content: ld.depot.content(),
            })
            .collect(),
        strongbox: board.resources.strongbox().resources(),
        leaders: board.cards.leaders().to_vec(),
        slots: board.cards.slots().stacks().to_vec(),
        faith_position: board.faith.position(),
        favours: board.faith.favours().to_vec(),
        progress: TurnProgress {
            resources: board.resources.action_state(),
            used_productions: board.cards.used_productions(),
            pending_purchase: board.pending_purchase,
        },
        phase,
        active,
    }
}

fn restore_market(config: &MatchConfig, record: &MarketRecord) -> Result<MarbleMarket> {
    let layout = &record.layout;
    if (layout.rows, layout.cols) != (config.market_rows, config.market_cols) {
        return invalid(format!(
            "{}x{} market, configured for {}x{}",
            layout.rows, layout.cols, config.market_rows, config.market_cols
        ));
    }
    let pending: ResourceBag = record.pending.iter().copied().collect();
    let market = MarbleMarket::resume(layout, pending, record.faith, record.white_drawn, record.white_remaining)?;

    let mut marbles: Vec<Marble> = layout.grid.iter().copied().chain([layout.spare]).collect();
    let mut expected: Vec<Marble> = config
        .marbles
        .iter()
        .flat_map(|&(marble, n)| std::iter::repeat(marble).take(n as usize))
        .collect();
    marbles.sort_by_key(|m| *m as u8);
    expected.sort_by_key(|m| *m as u8);
    if marbles != expected {
        return invalid("market marbles differ from the configured set".into());
    }
    Ok(market)
}

/// Rebuild one seat, refilling storage through the warehouse and strongbox
/// so capacity, purity and concreteness are checked as in play.
fn restore_board(
    config: &MatchConfig,
    grid: &DevelopmentGrid,
    reports: &ReportSchedule,
    record: &PlayerSnapshot,
) -> Result<PersonalBoard> {
    if record.depots.len() != config.depot_capacities.len() {
        return invalid(format!(
            "{} depots, configured for {}",
            record.depots.len(),
            config.depot_capacities.len()
        ));
    }
    if record.slots.len() != config.card_slots {
        return invalid(format!("{} slots, configured for {}", record.slots.len(), config.card_slots));
    }

    let mut resources = ResourceManager::new(&config.depot_capacities);
    let depot_order: Vec<LeaderId> = record.leader_depots.iter().map(|d| d.leader).collect();
    let cards = CardManager::resume(
        record.leaders.clone(),
        CardSlots::from_stacks(record.slots.clone())?,
        &record.progress.used_productions,
        &depot_order,
        &mut resources,
    )?;
    for (index, content) in record.depots.iter().enumerate() {
        if let Some(resource) = content {
            resources.add_to_warehouse(index, false, *resource)?;
        }
    }
    for (index, depot) in record.leader_depots.iter().enumerate() {
        if let Some(resource) = depot.content {
            resources.add_to_warehouse(index, true, resource)?;
        }
    }
    for resource in &record.strongbox {
        resources.add_to_strongbox(*resource)?;
    }
    resources.resume_action(&record.progress.resources)?;

    let faith = FaithTrack::resume(config.faith_track_length, record.faith_position, record.favours.clone())?;
    if faith.favours().len() > reports.reports().len()
        || (0..reports.reports().len()).any(|i| reports.is_fired(i) == (faith.favour(i) == FavourTile::Pending))
    {
        return invalid("favour tiles do not match the fired reports".into());
    }

    check_progress(record, grid, &cards)?;
    Ok(PersonalBoard {
        resources,
        cards,
        faith,
        pending_purchase: record.progress.pending_purchase,
    })
}

/// Only a seat part way through an action carries action state, and a
/// purchase in progress must still be possible.
fn check_progress(record: &PlayerSnapshot, grid: &DevelopmentGrid, cards: &CardManager) -> Result<()> {
    use TurnPhase as P;

    let phase = record.phase;
    let progress = &record.progress;
    let idle_phase = phase.is_setup() || matches!(phase, P::Waiting | P::LeaderManageBefore | P::LeaderManageAfter);
    if idle_phase && !progress.is_idle() {
        return invalid(format!("action state held in {phase:?}"));
    }

    let buying = matches!(phase, P::AnyBuyDevConversion | P::BuyDevResourceRemoving);
    match progress.pending_purchase {
        Some(purchase) if buying => {
            let card = grid.top(purchase.row, purchase.col)?;
            if !cards.can_place(purchase.slot, card) {
                return Err(EngineError::InvalidCardSlot(purchase.slot));
            }
            Ok(())
        }
        None if !buying => Ok(()),
        _ => invalid(format!("purchase in progress does not match {phase:?}")),
    }
}
