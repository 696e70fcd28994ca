//! Turn phases and which intents each one accepts.

use serde::{Deserialize, Serialize};

/// What input is expected from a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    // === Setup ===
    /// Discarding dealt leaders down to the kept count.
    SetupLeader,
    /// Choosing the seat's bonus resources.
    SetupResource,

    /// Not this player's turn, or setup finished.
    Waiting,

    // === Turn ===
    /// Start of turn: leader actions, then one main action.
    LeaderManageBefore,
    /// Placing or discarding resources drawn from the market.
    MarketResourcePositioning,
    /// Splitting white marbles among two or more marble effects.
    WhiteMarbleConversion,
    /// Naming the wildcard part of a development card cost.
    AnyBuyDevConversion,
    /// Removing a development card cost from storage.
    BuyDevResourceRemoving,
    /// Choosing productions to run.
    ProductionActions,
    /// Naming the wildcard part of a production cost.
    AnyProduceCostConversion,
    /// Naming the wildcard part of a production profit.
    AnyProduceProfitConversion,
    /// Removing production costs from storage.
    ProductionResourceRemoving,
    /// Main action done: leader actions, then end of turn.
    LeaderManageAfter,
}

impl TurnPhase {
    #[must_use]
    pub const fn is_setup(self) -> bool {
        matches!(self, TurnPhase::SetupLeader | TurnPhase::SetupResource)
    }

    /// Whether `intent` may be attempted in this phase.
    #[must_use]
    pub const fn allows(self, intent: IntentKind) -> bool {
        use IntentKind as I;
        use TurnPhase as P;

        match self {
            P::SetupLeader => matches!(intent, I::DiscardLeaderSetup),
            P::SetupResource => matches!(intent, I::SetupResources),
            P::Waiting => false,
            P::LeaderManageBefore => matches!(
                intent,
                I::ActivateLeader
                    | I::DiscardLeader
                    | I::SwitchDepots
                    | I::Market
                    | I::BuyDevelopment
                    | I::ProduceSlot
                    | I::ProduceBase
                    | I::ProduceLeader
            ),
            P::MarketResourcePositioning => {
                matches!(intent, I::PlaceInDepot | I::SwitchDepots | I::DiscardMarketResources)
            }
            P::WhiteMarbleConversion => matches!(intent, I::WhiteMarbleConversion),
            P::AnyBuyDevConversion | P::AnyProduceCostConversion | P::AnyProduceProfitConversion => {
                matches!(intent, I::AnyConversion)
            }
            P::BuyDevResourceRemoving | P::ProductionResourceRemoving => {
                matches!(intent, I::TakeFromDepot | I::TakeFromStrongbox)
            }
            P::ProductionActions => matches!(
                intent,
                I::ProduceSlot | I::ProduceBase | I::ProduceLeader | I::StopProduction
            ),
            P::LeaderManageAfter => matches!(
                intent,
                I::ActivateLeader | I::DiscardLeader | I::SwitchDepots | I::EndTurn
            ),
        }
    }
}

/// Discriminator of a player intent, used for phase checks and history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentKind {
    DiscardLeaderSetup,
    SetupResources,
    ActivateLeader,
    DiscardLeader,
    Market,
    WhiteMarbleConversion,
    PlaceInDepot,
    TakeFromDepot,
    TakeFromStrongbox,
    SwitchDepots,
    DiscardMarketResources,
    BuyDevelopment,
    ProduceSlot,
    ProduceBase,
    ProduceLeader,
    StopProduction,
    AnyConversion,
    EndTurn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_actions_only_at_turn_start() {
        assert!(TurnPhase::LeaderManageBefore.allows(IntentKind::Market));
        assert!(!TurnPhase::LeaderManageAfter.allows(IntentKind::Market));
        assert!(!TurnPhase::LeaderManageBefore.allows(IntentKind::EndTurn));
        assert!(TurnPhase::LeaderManageAfter.allows(IntentKind::EndTurn));
    }

    #[test]
    fn test_waiting_accepts_nothing() {
        assert!(!TurnPhase::Waiting.allows(IntentKind::EndTurn));
        assert!(!TurnPhase::Waiting.allows(IntentKind::ActivateLeader));
    }

    #[test]
    fn test_white_marble_conversion_blocks_placement() {
        assert!(!TurnPhase::WhiteMarbleConversion.allows(IntentKind::PlaceInDepot));
        assert!(!TurnPhase::WhiteMarbleConversion.allows(IntentKind::EndTurn));
        assert!(TurnPhase::WhiteMarbleConversion.allows(IntentKind::WhiteMarbleConversion));
    }

    #[test]
    fn test_conversion_phases() {
        for phase in [
            TurnPhase::AnyBuyDevConversion,
            TurnPhase::AnyProduceCostConversion,
            TurnPhase::AnyProduceProfitConversion,
        ] {
            assert!(phase.allows(IntentKind::AnyConversion));
            assert!(!phase.allows(IntentKind::TakeFromStrongbox));
        }
    }
}
