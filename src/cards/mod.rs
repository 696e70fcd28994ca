//! Leader and development cards.
//!
//! ## Key Types
//!
//! - `Leader`: a card owning one effect, live once activated
//! - `DevelopmentCard`: bought from the shared grid, produces from a slot
//! - `DevelopmentGrid`: shuffled stacks by level and colour
//! - `CardSlots`: a player's stacks of bought cards
//! - `CardManager`: a player's leaders, slots and production usage

pub mod development;
pub mod leader;
pub mod manager;
pub mod slots;

pub use development::{standard_development_cards, CardColor, DevelopmentCard, DevelopmentCardId, DevelopmentGrid};
pub use leader::{standard_leaders, CardRequirement, Leader, LeaderId, LeaderRequirement};
pub use manager::{CardManager, LeaderState, ProductionSource};
pub use slots::CardSlots;
