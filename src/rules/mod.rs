//! Turn rules.
//!
//! ## Key Types
//!
//! - `TurnPhase`: what input a player is expected to give
//! - `IntentKind`: the intents a phase may accept
//! - `TurnMachine`: per-player phases, turn order and action history

pub mod machine;
pub mod phase;

pub use machine::{ActionRecord, TurnMachine};
pub use phase::{IntentKind, TurnPhase};
