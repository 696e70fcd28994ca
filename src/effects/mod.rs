//! Leader effects.
//!
//! ## Key Types
//!
//! - `Effect`: marble transform, extra production, discount or extra depot
//! - `Production`: a cost/profit recipe, shared with development cards
//! - `EffectResolver`: attaches, detaches and fires effects
//! - `ResolverContext`: the market and resource manager an effect fires on

pub mod effect;
pub mod resolver;

pub use effect::{bundle, Bundle, Effect, EffectKind, Production};
pub use resolver::{EffectResolver, ResolveResult, ResolverContext};
