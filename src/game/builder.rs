//! Match construction.
//!
//! ```
//! use renaissance_core::core::{MatchConfig, PlayerId};
//! use renaissance_core::game::MatchBuilder;
//! use renaissance_core::rules::TurnPhase;
//!
//! let game = MatchBuilder::new(MatchConfig::new(2).with_seed(7)).build().unwrap();
//!
//! assert_eq!(game.phase(PlayerId::new(0)), TurnPhase::SetupLeader);
//! assert_eq!(game.board(PlayerId::new(1)).cards.leaders().len(), 4);
//! ```

use tracing::info;

use super::board::PersonalBoard;
use super::engine::Match;
use crate::cards::{standard_development_cards, standard_leaders, DevelopmentCard, DevelopmentGrid, Leader};
use crate::core::{EngineError, GameRng, MatchConfig, PlayerId, PlayerMap, Result};
use crate::faith::ReportSchedule;
use crate::market::MarbleMarket;
use crate::rules::{IntentKind, TurnMachine, TurnPhase};

/// Levels in the development grid.
pub const DEVELOPMENT_LEVELS: usize = 3;

pub struct MatchBuilder {
    config: MatchConfig,
    leaders: Vec<Leader>,
    development_cards: Vec<DevelopmentCard>,
}

impl MatchBuilder {
    /// A builder using the standard leader and development decks.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            leaders: standard_leaders(),
            development_cards: standard_development_cards(),
        }
    }

    #[must_use]
    pub fn with_leaders(mut self, leaders: Vec<Leader>) -> Self {
        self.leaders = leaders;
        self
    }

    #[must_use]
    pub fn with_development_cards(mut self, cards: Vec<DevelopmentCard>) -> Self {
        self.development_cards = cards;
        self
    }

    /// Shuffle everything from the configured seed and deal the leaders.
    pub fn build(self) -> Result<Match> {
        let config = self.config;
        config.validate()?;

        let rng = GameRng::new(config.seed);
        let market = MarbleMarket::shuffled(&config, &mut rng.for_context("market"))?;
        let grid = DevelopmentGrid::new(
            self.development_cards,
            DEVELOPMENT_LEVELS,
            &mut rng.for_context("development"),
        )?;

        let mut pool = self.leaders;
        let needed = config.player_count * config.leaders_dealt;
        if pool.len() < needed {
            return Err(EngineError::InvalidConfig(format!(
                "{} leaders needed, {} available",
                needed,
                pool.len()
            )));
        }
        rng.for_context("leaders").shuffle(&mut pool);
        let mut hands = pool.chunks(config.leaders_dealt.max(1)).map(<[Leader]>::to_vec);
        let boards = PlayerMap::new(config.player_count, |_| {
            let hand = if config.leaders_dealt == 0 {
                Vec::new()
            } else {
                hands.next().unwrap_or_default()
            };
            PersonalBoard::new(&config, hand)
        })?;

        let mut game = Match {
            market,
            grid,
            boards,
            machine: TurnMachine::new(config.player_count)?,
            reports: ReportSchedule::new(config.vatican_reports.clone()),
            config,
        };

        // Seats dealt no more than they keep skip the discard.
        for player in PlayerId::all(game.player_count()) {
            let phase = game.leader_setup_progress(player);
            if phase == TurnPhase::SetupLeader {
                continue;
            }
            game.machine.advance(player, IntentKind::DiscardLeaderSetup, phase);
            if phase == TurnPhase::Waiting {
                game.machine.finish_setup(player);
            }
        }

        info!(
            players = game.player_count(),
            seed = game.config.seed,
            "match created"
        );
        Ok(game)
    }
}
