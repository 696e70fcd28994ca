//! The per-match turn state machine.
//!
//! Holds every player's phase, whose turn it is and who is still
//! connected. The machine only checks and records; the match decides the
//! target phase after an operation succeeds.
//!
//! ## Setup
//!
//! All players start in `SetupLeader` and complete setup independently.
//! Once nobody is left in a setup phase, the first active seat starts its
//! turn in `LeaderManageBefore`.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::phase::{IntentKind, TurnPhase};
use crate::core::{EngineError, PlayerId, PlayerMap, Result};

/// One accepted intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub intent: IntentKind,
    pub from: TurnPhase,
    pub to: TurnPhase,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnMachine {
    phases: PlayerMap<TurnPhase>,
    active: PlayerMap<bool>,
    current: PlayerId,
    history: Vector<ActionRecord>,
}

impl TurnMachine {
    pub fn new(player_count: usize) -> Result<Self> {
        Ok(Self {
            phases: PlayerMap::with_value(player_count, TurnPhase::SetupLeader)?,
            active: PlayerMap::with_value(player_count, true)?,
            current: PlayerId::new(0),
            history: Vector::new(),
        })
    }

    /// Rebuild from persisted phases. History starts empty.
    ///
    /// While anyone is in setup, every seat is in setup or waiting. After
    /// setup, the current seat is mid-turn and everyone else waits.
    pub fn resume(phases: PlayerMap<TurnPhase>, active: PlayerMap<bool>, current: PlayerId) -> Result<Self> {
        let invalid = |reason: String| Err(EngineError::Snapshot(reason));
        if active.player_count() != phases.player_count() || !phases.contains(current) {
            return invalid(format!("{current} is not a seat of the table"));
        }
        let in_setup = phases.iter().any(|(_, p)| p.is_setup());
        for (player, &phase) in phases.iter() {
            let consistent = if in_setup {
                phase.is_setup() || phase == TurnPhase::Waiting
            } else if player == current {
                phase != TurnPhase::Waiting
            } else {
                phase == TurnPhase::Waiting
            };
            if !consistent {
                return invalid(format!("{player} cannot be in {phase:?} with {current} to play"));
            }
        }
        Ok(Self {
            phases,
            active,
            current,
            history: Vector::new(),
        })
    }

    #[must_use]
    pub fn phase(&self, player: PlayerId) -> TurnPhase {
        *self.phases.get(player)
    }

    #[must_use]
    pub fn phases(&self) -> &PlayerMap<TurnPhase> {
        &self.phases
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn is_active(&self, player: PlayerId) -> bool {
        *self.active.get(player)
    }

    #[must_use]
    pub fn activity(&self) -> &PlayerMap<bool> {
        &self.active
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn in_setup(&self) -> bool {
        self.phases.iter().any(|(_, p)| p.is_setup())
    }

    /// Check that `player` may attempt `intent` now.
    pub fn check(&self, player: PlayerId, intent: IntentKind) -> Result<()> {
        if !self.phases.contains(player) {
            return Err(EngineError::NotYourTurn { player });
        }
        let phase = self.phase(player);
        if !phase.is_setup() && player != self.current {
            return Err(EngineError::NotYourTurn { player });
        }
        if !phase.allows(intent) {
            return Err(EngineError::InvalidPhaseAction { phase });
        }
        Ok(())
    }

    /// Record an accepted intent and move `player` to `to`.
    pub fn advance(&mut self, player: PlayerId, intent: IntentKind, to: TurnPhase) {
        let from = self.phase(player);
        self.history.push_back(ActionRecord {
            player,
            intent,
            from,
            to,
        });
        if from != to {
            *self.phases.get_mut(player) = to;
            info!(%player, ?from, ?to, "phase transition");
        }
    }

    /// Mark `player`'s setup as complete, starting the first turn when
    /// nobody else is still setting up.
    pub fn finish_setup(&mut self, player: PlayerId) {
        *self.phases.get_mut(player) = TurnPhase::Waiting;
        if !self.in_setup() {
            self.current = PlayerId::new(0);
            if !self.is_active(self.current) {
                self.current = self.next_active(self.current);
            }
            *self.phases.get_mut(self.current) = TurnPhase::LeaderManageBefore;
            info!(first = %self.current, "setup complete, first turn");
        }
    }

    /// Hand the turn to the next active player.
    pub fn end_turn(&mut self) {
        let previous = self.current;
        *self.phases.get_mut(previous) = TurnPhase::Waiting;
        self.current = self.next_active(previous);
        *self.phases.get_mut(self.current) = TurnPhase::LeaderManageBefore;
        info!(from = %previous, to = %self.current, "turn passed");
    }

    fn next_active(&self, from: PlayerId) -> PlayerId {
        let count = self.phases.player_count();
        let mut next = from.next(count);
        for _ in 0..count {
            if self.is_active(next) {
                return next;
            }
            next = next.next(count);
        }
        // Nobody active: the turn stays put.
        from
    }

    pub fn set_player_active(&mut self, player: PlayerId, active: bool) {
        if self.active.contains(player) {
            *self.active.get_mut(player) = active;
            info!(%player, active, "player activity changed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(n: u8) -> PlayerId {
        PlayerId::new(n)
    }

    fn started(players: usize) -> TurnMachine {
        let mut m = TurnMachine::new(players).unwrap();
        for id in PlayerId::all(players) {
            m.finish_setup(id);
        }
        m
    }

    #[test]
    fn test_setup_is_simultaneous() {
        let mut m = TurnMachine::new(3).unwrap();

        assert!(m.check(p(2), IntentKind::DiscardLeaderSetup).is_ok());
        m.finish_setup(p(2));
        assert_eq!(m.phase(p(2)), TurnPhase::Waiting);
        assert_eq!(m.phase(p(0)), TurnPhase::SetupLeader);

        m.finish_setup(p(0));
        m.finish_setup(p(1));
        assert_eq!(m.phase(p(0)), TurnPhase::LeaderManageBefore);
        assert_eq!(m.current_player(), p(0));
    }

    #[test]
    fn test_only_current_player_acts() {
        let m = started(2);

        assert_eq!(
            m.check(p(1), IntentKind::Market),
            Err(EngineError::NotYourTurn { player: p(1) })
        );
        assert!(m.check(p(0), IntentKind::Market).is_ok());
        assert_eq!(
            m.check(p(0), IntentKind::EndTurn),
            Err(EngineError::InvalidPhaseAction {
                phase: TurnPhase::LeaderManageBefore
            })
        );
    }

    #[test]
    fn test_end_turn_skips_inactive() {
        let mut m = started(3);
        m.set_player_active(p(1), false);

        m.end_turn();

        assert_eq!(m.current_player(), p(2));
        assert_eq!(m.phase(p(0)), TurnPhase::Waiting);
        assert_eq!(m.phase(p(2)), TurnPhase::LeaderManageBefore);
    }

    #[test]
    fn test_history_records_transitions() {
        let mut m = started(2);
        m.advance(p(0), IntentKind::Market, TurnPhase::LeaderManageAfter);

        let last = m.history().back().unwrap();
        assert_eq!(last.from, TurnPhase::LeaderManageBefore);
        assert_eq!(last.to, TurnPhase::LeaderManageAfter);
        assert_eq!(m.phase(p(0)), TurnPhase::LeaderManageAfter);
    }

    #[test]
    fn test_unknown_player() {
        let m = started(2);
        assert!(matches!(m.check(p(3), IntentKind::Market), Err(EngineError::NotYourTurn { .. })));
    }

    #[test]
    fn test_resume_keeps_one_seat_in_turn() {
        let m = started(3);
        let resumed =
            TurnMachine::resume(m.phases().clone(), m.activity().clone(), m.current_player()).unwrap();
        assert_eq!(resumed.phase(p(0)), TurnPhase::LeaderManageBefore);

        // Two seats mid-turn.
        let mut phases = m.phases().clone();
        phases[p(2)] = TurnPhase::LeaderManageAfter;
        let err = TurnMachine::resume(phases, m.activity().clone(), p(0)).unwrap_err();
        assert!(matches!(err, EngineError::Snapshot(_)));

        // Current seat not playing.
        assert!(TurnMachine::resume(m.phases().clone(), m.activity().clone(), p(1)).is_err());
        // Unknown seat.
        assert!(TurnMachine::resume(m.phases().clone(), m.activity().clone(), p(5)).is_err());
    }

    #[test]
    fn test_resume_during_setup() {
        let mut m = TurnMachine::new(2).unwrap();
        m.finish_setup(p(1));
        assert!(TurnMachine::resume(m.phases().clone(), m.activity().clone(), p(0)).is_ok());

        let mut phases = m.phases().clone();
        phases[p(1)] = TurnPhase::MarketResourcePositioning;
        assert!(TurnMachine::resume(phases, m.activity().clone(), p(0)).is_err());
    }
}
