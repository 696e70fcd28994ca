//! Resources and their storage.
//!
//! ## Storage
//!
//! - [`Warehouse`]: capacity-limited depots, one kind per depot, plus
//!   depots granted by leaders.
//! - Strongbox: an unlimited [`ResourceBag`], filled only by production.
//! - [`ResourceManager`]: both of the above plus the per-action buffer,
//!   owed wildcards and the production queue.

pub mod depot;
pub mod manager;
pub mod resource;

pub use depot::{Depot, LeaderDepot, Warehouse};
pub use manager::{ActionState, Affordability, ResourceManager};
pub use resource::{checked_total, Resource, ResourceBag, ResourceType};
