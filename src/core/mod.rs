//! Core engine types: players, RNG, configuration, errors.
//!
//! These are shared by every other module and carry no game rules of
//! their own.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{MatchConfig, SetupBonus};
pub use error::{ConversionFault, EngineError, Result};
pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use rng::GameRng;
