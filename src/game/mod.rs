//! Matches.
//!
//! ## Key Types
//!
//! - `Intent`: a player request
//! - `Outcome`: the resulting phase, plus the drawn delta for market actions
//! - `PersonalBoard`: one seat's storage, cards and faith track
//! - `Match`: the shared market and grid, the boards and the turn machine
//! - `MatchBuilder`: shuffles and deals from a `MatchConfig`
//! - `MatchSnapshot`: versioned save/resume records, restored with validation

pub mod board;
pub mod builder;
pub mod engine;
pub mod intent;
pub mod snapshot;

pub use board::{PendingPurchase, PersonalBoard};
pub use builder::{MatchBuilder, DEVELOPMENT_LEVELS};
pub use engine::Match;
pub use intent::{Intent, Outcome};
pub use snapshot::{LeaderDepotRecord, MarketRecord, MatchSnapshot, PlayerSnapshot, TurnProgress, SNAPSHOT_VERSION};
