//! Marble market.
//!
//! ## Key Types
//!
//! - `Marble`: marble colour
//! - `MarbleYield`: resource, white wildcard or faith
//! - `MarbleMarket`: the grid, the spare marble and per-insertion tallies
//! - `MarketSnapshot`: layout only, for persistence

pub mod board;
pub mod marble;

pub use board::{MarbleMarket, MarketSnapshot};
pub use marble::{Marble, MarbleYield};
