//! Effect resolution.
//!
//! Effects are resolved against the market and a player's resource manager
//! borrowed for the duration of one call. Which player and leader is
//! resolved by the caller through the match registry.
//!
//! ## Lifecycle
//!
//! - `attach`: the leader was activated. Standing effects (discount, depot)
//!   take hold immediately.
//! - `fire`: the effect is used. It only does something in the phase it
//!   belongs to and reports `Skipped` otherwise.
//! - `detach`: the leader was discarded. Standing effects are withdrawn.

use tracing::debug;

use super::effect::Effect;
use crate::cards::LeaderId;
use crate::core::Result;
use crate::market::MarbleMarket;
use crate::resources::ResourceManager;
use crate::rules::TurnPhase;

/// What an effect fires against.
pub struct ResolverContext<'a> {
    pub phase: TurnPhase,
    pub market: &'a mut MarbleMarket,
    pub resources: &'a mut ResourceManager,
}

impl<'a> ResolverContext<'a> {
    pub fn new(phase: TurnPhase, market: &'a mut MarbleMarket, resources: &'a mut ResourceManager) -> Self {
        Self {
            phase,
            market,
            resources,
        }
    }
}

/// Result of firing an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// The effect changed state.
    Applied,
    /// Not this effect's phase, or nothing to do.
    Skipped,
}

pub struct EffectResolver;

impl EffectResolver {
    /// Install a standing effect for `leader`.
    pub fn attach(effect: &Effect, leader: LeaderId, resources: &mut ResourceManager) {
        match effect {
            Effect::Discount { discount } => resources.add_discount(discount),
            Effect::Depot { kind, capacity } => resources.add_leader_depot(leader, *kind, *capacity),
            Effect::Marble { .. } | Effect::Production(_) => {}
        }
        debug!(%leader, kind = ?effect.kind(), "effect attached");
    }

    /// Withdraw a standing effect of `leader`.
    pub fn detach(effect: &Effect, leader: LeaderId, resources: &mut ResourceManager) {
        match effect {
            Effect::Discount { discount } => resources.remove_discount(discount),
            Effect::Depot { .. } => {
                if let Some(lost) = resources.remove_leader_depot(leader) {
                    debug!(%leader, %lost, "leader depot contents lost");
                }
            }
            Effect::Marble { .. } | Effect::Production(_) => {}
        }
        debug!(%leader, kind = ?effect.kind(), "effect detached");
    }

    /// Use an effect in the current phase.
    ///
    /// A marble effect transforms the white marbles declared on the market
    /// with `set_white_marble_to_transform`. A production effect stages its
    /// cost and queues its profit; nothing changes if the cost cannot be met.
    pub fn fire(effect: &Effect, ctx: &mut ResolverContext<'_>) -> Result<ResolveResult> {
        match (effect, ctx.phase) {
            (Effect::Marble { transform }, TurnPhase::WhiteMarbleConversion) => {
                let count = ctx.market.white_marble_to_transform();
                if count == 0 {
                    return Ok(ResolveResult::Skipped);
                }
                let produced: Vec<_> = transform.iter().map(|r| r.scaled(count)).collect();
                ctx.market.insert_leader_resources(&produced);
                Ok(ResolveResult::Applied)
            }
            (Effect::Production(production), TurnPhase::ProductionActions) => {
                ctx.resources.stage_requirement(production.cost(), false)?;
                ctx.resources.add_to_resources_to_produce(production.profit());
                Ok(ResolveResult::Applied)
            }
            _ => Ok(ResolveResult::Skipped),
        }
    }
}
