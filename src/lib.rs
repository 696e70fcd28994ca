//! # renaissance-core
//!
//! Rules engine for a turn-based resource card game played around a
//! shared marble market.
//!
//! Players draw resources from the market, store them under depot
//! capacity and type limits, spend them on development cards and
//! productions, and advance along a faith track. The engine exposes pure
//! state transitions: an orchestrator feeds player intents to a [`Match`]
//! and gets back the new phase or a typed error.
//!
//! ## Design Principles
//!
//! 1. **Atomic calls**: a failed storage or market operation leaves state
//!    untouched. Multi-step actions roll back explicitly.
//!
//! 2. **Index-based access**: boards are addressed by [`PlayerId`]
//!    through a [`PlayerMap`]; effects never hold references to the market
//!    or a resource manager.
//!
//! 3. **Closed effect set**: leader effects are an enum resolved against
//!    the current turn phase.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, errors
//! - `resources`: resource types, depots, warehouse, resource manager
//! - `market`: the marble market
//! - `effects`: leader effects and their resolution
//! - `cards`: leaders, development cards, card slots
//! - `faith`: faith track and vatican reports
//! - `rules`: turn phases and the turn machine
//! - `game`: intents, personal boards, matches and snapshots
//!
//! ## Example
//!
//! ```
//! use renaissance_core::{Intent, MatchBuilder, MatchConfig, PlayerId, TurnPhase};
//!
//! let mut game = MatchBuilder::new(MatchConfig::new(1).with_seed(3)).build().unwrap();
//! let me = PlayerId::new(0);
//!
//! game.apply(me, Intent::DiscardLeaderSetup { leader: 0 }).unwrap();
//! game.apply(me, Intent::DiscardLeaderSetup { leader: 0 }).unwrap();
//! assert_eq!(game.phase(me), TurnPhase::LeaderManageBefore);
//! ```

pub mod cards;
pub mod core;
pub mod effects;
pub mod faith;
pub mod game;
pub mod market;
pub mod resources;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{ConversionFault, EngineError, GameRng, MatchConfig, PlayerId, PlayerMap, Result};

pub use crate::resources::{Depot, Resource, ResourceBag, ResourceManager, ResourceType, Warehouse};

pub use crate::market::{Marble, MarbleMarket, MarketSnapshot};

pub use crate::effects::{Effect, EffectResolver, Production, ResolverContext};

pub use crate::cards::{CardColor, CardManager, DevelopmentCard, DevelopmentGrid, Leader, LeaderId};

pub use crate::faith::{FaithTrack, VaticanReport};

pub use crate::rules::{IntentKind, TurnMachine, TurnPhase};

pub use crate::game::{Intent, Match, MatchBuilder, MatchSnapshot, Outcome, PersonalBoard};
