//! Player intents and their outcomes.

use serde::{Deserialize, Serialize};

use crate::market::MarketSnapshot;
use crate::resources::{Resource, ResourceBag};
use crate::rules::{IntentKind, TurnPhase};

/// A request from a player, checked against their phase before it runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    // === Setup ===
    DiscardLeaderSetup { leader: usize },
    SetupResources { resources: Vec<Resource> },

    // === Leaders ===
    ActivateLeader { leader: usize },
    DiscardLeader { leader: usize },

    // === Market ===
    Market { selection: usize, is_row: bool },
    /// Assign `count` of the drawn white marbles to the marble effect of
    /// leader `leader`.
    WhiteMarbleConversion { leader: usize, count: u32 },
    PlaceInDepot { resource: Resource, depot: usize, leader_depot: bool },
    DiscardMarketResources,

    // === Storage ===
    TakeFromDepot { resource: Resource, depot: usize, leader_depot: bool },
    TakeFromStrongbox { resource: Resource },
    SwitchDepots { from: usize, from_leader: bool, to: usize, to_leader: bool },

    // === Development ===
    BuyDevelopment { row: usize, col: usize, slot: usize },

    // === Production ===
    ProduceSlot { slot: usize },
    ProduceBase,
    ProduceLeader { leader: usize },
    StopProduction,

    /// Name concrete resources for the wildcard amount currently owed.
    AnyConversion { resources: Vec<Resource> },

    EndTurn,
}

impl Intent {
    #[must_use]
    pub const fn kind(&self) -> IntentKind {
        match self {
            Intent::DiscardLeaderSetup { .. } => IntentKind::DiscardLeaderSetup,
            Intent::SetupResources { .. } => IntentKind::SetupResources,
            Intent::ActivateLeader { .. } => IntentKind::ActivateLeader,
            Intent::DiscardLeader { .. } => IntentKind::DiscardLeader,
            Intent::Market { .. } => IntentKind::Market,
            Intent::WhiteMarbleConversion { .. } => IntentKind::WhiteMarbleConversion,
            Intent::PlaceInDepot { .. } => IntentKind::PlaceInDepot,
            Intent::DiscardMarketResources => IntentKind::DiscardMarketResources,
            Intent::TakeFromDepot { .. } => IntentKind::TakeFromDepot,
            Intent::TakeFromStrongbox { .. } => IntentKind::TakeFromStrongbox,
            Intent::SwitchDepots { .. } => IntentKind::SwitchDepots,
            Intent::BuyDevelopment { .. } => IntentKind::BuyDevelopment,
            Intent::ProduceSlot { .. } => IntentKind::ProduceSlot,
            Intent::ProduceBase => IntentKind::ProduceBase,
            Intent::ProduceLeader { .. } => IntentKind::ProduceLeader,
            Intent::StopProduction => IntentKind::StopProduction,
            Intent::AnyConversion { .. } => IntentKind::AnyConversion,
            Intent::EndTurn => IntentKind::EndTurn,
        }
    }
}

/// Result of an accepted intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The acting player's phase after the intent.
    Phase(TurnPhase),
    /// A market action or white marble split.
    Market {
        /// Resources drawn so far this insertion.
        drawn: ResourceBag,
        /// White marbles drawn by the insertion.
        white_marbles: u32,
        market: MarketSnapshot,
        phase: TurnPhase,
    },
}

impl Outcome {
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        match self {
            Outcome::Phase(phase) | Outcome::Market { phase, .. } => *phase,
        }
    }

    pub(crate) fn with_phase(self, to: TurnPhase) -> Self {
        match self {
            Outcome::Phase(_) => Outcome::Phase(to),
            Outcome::Market {
                drawn,
                white_marbles,
                market,
                ..
            } => Outcome::Market {
                drawn,
                white_marbles,
                market,
                phase: to,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Intent::EndTurn.kind(), IntentKind::EndTurn);
        assert_eq!(
            Intent::Market { selection: 0, is_row: true }.kind(),
            IntentKind::Market
        );
        assert_eq!(
            Intent::AnyConversion { resources: vec![] }.kind(),
            IntentKind::AnyConversion
        );
    }

    #[test]
    fn test_intent_json() {
        let intent = Intent::PlaceInDepot {
            resource: Resource::coin(1),
            depot: 2,
            leader_depot: false,
        };
        let json = serde_json::to_string(&intent).unwrap();
        assert_eq!(serde_json::from_str::<Intent>(&json).unwrap(), intent);
    }

    #[test]
    fn test_outcome_with_phase() {
        let outcome = Outcome::Phase(TurnPhase::Waiting).with_phase(TurnPhase::LeaderManageBefore);
        assert_eq!(outcome.phase(), TurnPhase::LeaderManageBefore);
    }
}
