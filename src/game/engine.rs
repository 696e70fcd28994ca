//! The match: shared market and development grid, one personal board per
//! seat, and the turn machine gating every intent.
//!
//! ## Flow
//!
//! `Match::apply` checks the intent against the player's phase, runs it,
//! and moves the player to the phase the operation leads to. A rejected
//! intent leaves the phase unchanged so the player can retry.
//!
//! Actions that stage resources in the buffer (market draws, costs to
//! pay) finish on their own once the buffer is empty: faith tallied during
//! the action is applied to the track and the player moves on to
//! `LeaderManageAfter`.

use tracing::{debug, info, warn};

use super::board::{PendingPurchase, PersonalBoard};
use super::intent::{Intent, Outcome};
use crate::cards::{DevelopmentGrid, ProductionSource};
use crate::core::{ConversionFault, EngineError, MatchConfig, PlayerId, PlayerMap, Result};
use crate::effects::{Effect, EffectKind, EffectResolver, ResolverContext};
use crate::faith::ReportSchedule;
use crate::market::MarbleMarket;
use crate::resources::{checked_total, Resource, ResourceBag, ResourceManager};
use crate::rules::{ActionRecord, IntentKind, TurnMachine, TurnPhase};

pub struct Match {
    pub(crate) config: MatchConfig,
    pub(crate) market: MarbleMarket,
    pub(crate) grid: DevelopmentGrid,
    pub(crate) boards: PlayerMap<PersonalBoard>,
    pub(crate) machine: TurnMachine,
    pub(crate) reports: ReportSchedule,
}

impl Match {
    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn market(&self) -> &MarbleMarket {
        &self.market
    }

    #[must_use]
    pub fn development_grid(&self) -> &DevelopmentGrid {
        &self.grid
    }

    #[must_use]
    pub fn board(&self, player: PlayerId) -> &PersonalBoard {
        &self.boards[player]
    }

    #[must_use]
    pub fn phase(&self, player: PlayerId) -> TurnPhase {
        self.machine.phase(player)
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.machine.current_player()
    }

    #[must_use]
    pub fn reports(&self) -> &ReportSchedule {
        &self.reports
    }

    #[must_use]
    pub fn history(&self) -> &im::Vector<ActionRecord> {
        self.machine.history()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.boards.player_count()
    }

    // === Orchestrator hooks ===

    /// Mark a seat as connected or not. Inactive seats are skipped when
    /// the turn passes.
    pub fn set_player_active(&mut self, player: PlayerId, active: bool) {
        self.machine.set_player_active(player, active);
    }

    /// End `player`'s turn regardless of phase, dropping the action in
    /// progress. During setup the remaining choices are made for them.
    pub fn force_end_turn(&mut self, player: PlayerId) -> Result<()> {
        if !self.boards.contains(player) {
            return Err(EngineError::NotYourTurn { player });
        }
        let phase = self.machine.phase(player);
        if phase.is_setup() {
            return self.auto_setup(player);
        }
        if player != self.machine.current_player() || phase == TurnPhase::Waiting {
            return Ok(());
        }
        self.boards[player].abandon_action();
        self.market.reset();
        warn!(%player, ?phase, "turn forcibly ended");
        self.machine.end_turn();
        Ok(())
    }

    fn auto_setup(&mut self, player: PlayerId) -> Result<()> {
        while self.machine.phase(player) == TurnPhase::SetupLeader {
            self.apply(player, Intent::DiscardLeaderSetup { leader: 0 })?;
        }
        if self.machine.phase(player) == TurnPhase::SetupResource {
            let bonus = self.config.setup_bonus(player.index());
            self.apply(
                player,
                Intent::SetupResources {
                    resources: vec![Resource::coin(bonus.resources)],
                },
            )?;
        }
        Ok(())
    }

    // === Intents ===

    /// Run `intent` for `player`.
    pub fn apply(&mut self, player: PlayerId, intent: Intent) -> Result<Outcome> {
        let kind = intent.kind();
        if let Err(err) = self.machine.check(player, kind) {
            warn!(%player, ?kind, error = %err, "intent rejected");
            return Err(err);
        }

        let outcome = match self.dispatch(player, intent) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(%player, ?kind, error = %err, "intent failed");
                return Err(err);
            }
        };

        let to = outcome.phase();
        self.machine.advance(player, kind, to);
        if kind == IntentKind::EndTurn {
            self.machine.end_turn();
        } else if to == TurnPhase::Waiting
            && matches!(kind, IntentKind::DiscardLeaderSetup | IntentKind::SetupResources)
        {
            self.machine.finish_setup(player);
        }
        Ok(outcome.with_phase(self.machine.phase(player)))
    }

    fn dispatch(&mut self, player: PlayerId, intent: Intent) -> Result<Outcome> {
        let phase = self.machine.phase(player);
        let to = match intent {
            Intent::DiscardLeaderSetup { leader } => {
                self.boards[player].cards.discard_leader_setup(leader)?;
                self.leader_setup_progress(player)
            }
            Intent::SetupResources { resources } => {
                self.setup_resources(player, &resources)?;
                TurnPhase::Waiting
            }

            Intent::ActivateLeader { leader } => {
                let board = &mut self.boards[player];
                board.cards.activate_leader(leader, &mut board.resources)?;
                phase
            }
            Intent::DiscardLeader { leader } => {
                let board = &mut self.boards[player];
                board.cards.discard_leader(leader, &mut board.resources)?;
                self.grant_faith(player, 1);
                phase
            }

            Intent::Market { selection, is_row } => return self.market_action(player, selection, is_row),
            Intent::WhiteMarbleConversion { leader, count } => {
                return self.white_marble_conversion(player, leader, count)
            }
            Intent::PlaceInDepot {
                resource,
                depot,
                leader_depot,
            } => {
                let rm = &mut self.boards[player].resources;
                rm.sub_to_buffer(resource)?;
                if let Err(err) = rm.add_to_warehouse(depot, leader_depot, resource) {
                    rm.add_to_buffer(resource);
                    return Err(err);
                }
                self.complete_if_settled(player, phase)?
            }
            Intent::DiscardMarketResources => {
                let dropped = self.boards[player].resources.discard_resources_from_market();
                let others: Vec<_> = self.boards.player_ids().filter(|&p| p != player).collect();
                for other in others {
                    self.grant_faith(other, dropped);
                }
                self.complete_if_settled(player, phase)?
            }

            Intent::TakeFromDepot {
                resource,
                depot,
                leader_depot,
            } => {
                let rm = &mut self.boards[player].resources;
                rm.sub_to_buffer(resource)?;
                if let Err(err) = rm.sub_to_warehouse(depot, leader_depot, resource) {
                    rm.add_to_buffer(resource);
                    return Err(err);
                }
                self.complete_if_settled(player, phase)?
            }
            Intent::TakeFromStrongbox { resource } => {
                let rm = &mut self.boards[player].resources;
                rm.sub_to_buffer(resource)?;
                if let Err(err) = rm.sub_to_strongbox(resource) {
                    rm.add_to_buffer(resource);
                    return Err(err);
                }
                self.complete_if_settled(player, phase)?
            }
            Intent::SwitchDepots {
                from,
                from_leader,
                to,
                to_leader,
            } => {
                self.boards[player]
                    .resources
                    .switch_resource_from_depot_to_depot(from, from_leader, to, to_leader)?;
                phase
            }

            Intent::BuyDevelopment { row, col, slot } => {
                let card = self.grid.top(row, col)?;
                let board = &mut self.boards[player];
                if !board.cards.can_place(slot, card) {
                    return Err(EngineError::InvalidCardSlot(slot));
                }
                let owed = board.resources.stage_requirement(&card.cost, true)?;
                board.pending_purchase = Some(PendingPurchase { row, col, slot });
                info!(%player, card = %card.id, owed, "development card chosen");
                if owed > 0 {
                    TurnPhase::AnyBuyDevConversion
                } else {
                    self.complete_if_settled(player, TurnPhase::BuyDevResourceRemoving)?
                }
            }

            Intent::ProduceSlot { slot } => self.produce(player, ProductionSource::Slot(slot))?,
            Intent::ProduceBase => self.produce(player, ProductionSource::Base)?,
            Intent::ProduceLeader { leader } => {
                let id = self.boards[player].cards.leader(leader)?.leader.id;
                self.produce(player, ProductionSource::Leader(id))?
            }
            Intent::StopProduction => {
                if !self.boards[player].cards.any_production_used() {
                    return Err(EngineError::NoProductionSelected);
                }
                self.complete_if_settled(player, TurnPhase::ProductionResourceRemoving)?
            }

            Intent::AnyConversion { resources } => self.any_conversion(player, phase, &resources)?,

            Intent::EndTurn => TurnPhase::Waiting,
        };
        Ok(Outcome::Phase(to))
    }

    // === Setup ===

    /// Phase after a setup discard: keep discarding, choose bonus
    /// resources, or wait for the others.
    pub(crate) fn leader_setup_progress(&mut self, player: PlayerId) -> TurnPhase {
        if self.boards[player].cards.leaders().len() > self.config.leaders_kept {
            return TurnPhase::SetupLeader;
        }
        let bonus = self.config.setup_bonus(player.index());
        self.grant_faith(player, bonus.faith);
        if bonus.resources > 0 {
            TurnPhase::SetupResource
        } else {
            TurnPhase::Waiting
        }
    }

    /// Put the seat's bonus resources in the warehouse, each kind in the
    /// smallest empty depot that holds it.
    fn setup_resources(&mut self, player: PlayerId, declared: &[Resource]) -> Result<()> {
        let owed = self.config.setup_bonus(player.index()).resources;
        if let Some(bad) = declared.iter().find(|r| !r.kind.is_concrete()) {
            return Err(EngineError::WildcardConversionMismatch(
                ConversionFault::NotConcrete(bad.kind),
            ));
        }
        match checked_total(declared) {
            Some(total) if total == owed => {}
            total => {
                return Err(EngineError::WildcardConversionMismatch(ConversionFault::Total {
                    owed,
                    declared: total.unwrap_or(u32::MAX),
                }));
            }
        }
        let bag: ResourceBag = declared.iter().copied().collect();

        let mut staged = self.boards[player].resources.clone();
        let mut resources = bag.resources();
        resources.sort_by_key(|r| std::cmp::Reverse(r.amount));
        for resource in resources {
            let depot = staged
                .warehouse()
                .depots()
                .iter()
                .enumerate()
                .filter(|(_, d)| d.is_empty() && d.capacity() >= resource.amount)
                .min_by_key(|(_, d)| d.capacity())
                .map(|(i, _)| i)
                .ok_or_else(|| EngineError::InvalidSetup(format!("no depot can hold {resource}")))?;
            staged.add_to_warehouse(depot, false, resource)?;
        }
        self.boards[player].resources = staged;
        Ok(())
    }

    // === Market ===

    fn market_action(&mut self, player: PlayerId, selection: usize, is_row: bool) -> Result<Outcome> {
        self.market.reset();
        let white = self.market.insert(selection, is_row)?;

        let board = &mut self.boards[player];
        let effects: Vec<Effect> = board.cards.marble_effects().map(|(_, e)| e.clone()).collect();
        if white > 0 && effects.len() >= 2 {
            info!(%player, white, effects = effects.len(), "white marbles need a split");
            return Ok(self.market_outcome(white, TurnPhase::WhiteMarbleConversion));
        }
        match effects.first() {
            Some(effect) if white > 0 => {
                self.market.set_white_marble_to_transform(white)?;
                let mut ctx = ResolverContext::new(TurnPhase::WhiteMarbleConversion, &mut self.market, &mut board.resources);
                EffectResolver::fire(effect, &mut ctx)?;
            }
            _ => self.market.discard_white_marbles(),
        }

        let drawn = self.market.pending().clone();
        let phase = self.send_market_resources(player)?;
        Ok(Outcome::Market {
            drawn,
            white_marbles: white,
            market: self.market.snapshot(),
            phase,
        })
    }

    fn white_marble_conversion(&mut self, player: PlayerId, leader: usize, count: u32) -> Result<Outcome> {
        let board = &mut self.boards[player];
        if board.cards.marble_effect_count() == 0 {
            return Err(EngineError::NoMarbleEffects);
        }
        let state = board.cards.leader(leader)?;
        if !state.active || state.leader.effect.kind() != EffectKind::Marble {
            return Err(EngineError::WrongLeaderEffect(leader));
        }
        let effect = state.leader.effect.clone();

        self.market.set_white_marble_to_transform(count)?;
        let mut ctx = ResolverContext::new(TurnPhase::WhiteMarbleConversion, &mut self.market, &mut board.resources);
        EffectResolver::fire(&effect, &mut ctx)?;
        debug!(%player, leader, count, remaining = self.market.white_remaining(), "white marbles assigned");

        let white = self.market.white_marble_drew();
        if self.market.white_remaining() > 0 {
            return Ok(self.market_outcome(white, TurnPhase::WhiteMarbleConversion));
        }
        let drawn = self.market.pending().clone();
        let phase = self.send_market_resources(player)?;
        Ok(Outcome::Market {
            drawn,
            white_marbles: white,
            market: self.market.snapshot(),
            phase,
        })
    }

    fn market_outcome(&self, white_marbles: u32, phase: TurnPhase) -> Outcome {
        Outcome::Market {
            drawn: self.market.pending().clone(),
            white_marbles,
            market: self.market.snapshot(),
            phase,
        }
    }

    /// Move the drained market delta into the player's buffer.
    fn send_market_resources(&mut self, player: PlayerId) -> Result<TurnPhase> {
        let (drawn, faith) = self.market.take_resources_to_send();
        self.boards[player].resources.resource_from_market(&drawn, faith);
        self.market.reset();
        self.complete_if_settled(player, TurnPhase::MarketResourcePositioning)
    }

    // === Production ===

    fn produce(&mut self, player: PlayerId, source: ProductionSource) -> Result<TurnPhase> {
        let board = &mut self.boards[player];
        if board.cards.is_production_used(source) {
            return Err(EngineError::ProductionAlreadyUsed);
        }
        let effect = Effect::Production(board.cards.production(source)?.clone());
        let mut ctx = ResolverContext::new(TurnPhase::ProductionActions, &mut self.market, &mut board.resources);
        EffectResolver::fire(&effect, &mut ctx)?;
        board.cards.mark_production_used(source)?;
        debug!(%player, ?source, "production selected");
        Ok(production_phase(&board.resources))
    }

    fn any_conversion(&mut self, player: PlayerId, phase: TurnPhase, declared: &[Resource]) -> Result<TurnPhase> {
        let rm = &mut self.boards[player].resources;
        match phase {
            TurnPhase::AnyBuyDevConversion => {
                rm.convert_any_requirement(declared, true)?;
                self.complete_if_settled(player, TurnPhase::BuyDevResourceRemoving)
            }
            TurnPhase::AnyProduceCostConversion => {
                rm.convert_any_requirement(declared, false)?;
                Ok(production_phase(rm))
            }
            TurnPhase::AnyProduceProfitConversion => {
                rm.convert_any_production_profit(declared)?;
                Ok(production_phase(rm))
            }
            _ => Err(EngineError::InvalidPhaseAction { phase }),
        }
    }

    // === Completion ===

    /// Finish a buffer-driven action once nothing is left in the buffer.
    fn complete_if_settled(&mut self, player: PlayerId, phase: TurnPhase) -> Result<TurnPhase> {
        if self.boards[player].resources.buffer_size() > 0 {
            return Ok(phase);
        }
        let board = &mut self.boards[player];
        match phase {
            TurnPhase::MarketResourcePositioning => {}
            TurnPhase::BuyDevResourceRemoving => {
                if let Some(purchase) = board.pending_purchase.take() {
                    let card = self.grid.take(purchase.row, purchase.col)?;
                    info!(%player, card = %card.id, slot = purchase.slot, "development card bought");
                    board.cards.place_card(purchase.slot, card)?;
                }
            }
            TurnPhase::ProductionResourceRemoving => {
                board.resources.do_production();
                board.cards.reset_productions();
            }
            _ => return Ok(phase),
        }
        self.settle_faith(player);
        self.boards[player].resources.restore();
        Ok(TurnPhase::LeaderManageAfter)
    }

    // === Faith ===

    fn settle_faith(&mut self, player: PlayerId) {
        if self.boards[player].settle_faith() > 0 {
            self.check_vatican_reports();
        }
    }

    /// Move `player` by `steps` right away.
    fn grant_faith(&mut self, player: PlayerId, steps: u32) {
        if steps == 0 {
            return;
        }
        self.boards[player].faith.move_player(steps);
        self.check_vatican_reports();
    }

    fn check_vatican_reports(&mut self) {
        let furthest = self
            .boards
            .iter()
            .map(|(_, b)| b.faith.position())
            .max()
            .unwrap_or(0);
        for (index, report) in self.reports.due(furthest) {
            info!(index, pope_space = report.pope_space, "vatican report");
            for (_, board) in self.boards.iter_mut() {
                board.faith.resolve_report(index, &report);
            }
        }
    }
}

/// Where a production action stands after a step.
fn production_phase(rm: &ResourceManager) -> TurnPhase {
    if rm.any_requirement() > 0 {
        TurnPhase::AnyProduceCostConversion
    } else if rm.any_profit() > 0 {
        TurnPhase::AnyProduceProfitConversion
    } else {
        TurnPhase::ProductionActions
    }
}

impl std::fmt::Debug for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("players", &self.player_count())
            .field("current", &self.current_player())
            .field("phases", self.machine.phases())
            .finish_non_exhaustive()
    }
}
