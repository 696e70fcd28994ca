//! Engine error type.
//!
//! Every fallible operation in the crate returns [`Result`]. Errors are
//! local to the call that produced them: the storage model and the market
//! never keep a partial mutation, and the match stays in the phase it was in
//! so the player can retry.

use thiserror::Error;

use super::player::PlayerId;
use crate::resources::ResourceType;
use crate::rules::TurnPhase;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Why a wildcard declaration was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversionFault {
    /// Declared total differs from the owed wildcard total.
    Total { owed: u32, declared: u32 },
    /// A declared resource is not a concrete storable type.
    NotConcrete(ResourceType),
}

impl std::fmt::Display for ConversionFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionFault::Total { owed, declared } => {
                write!(f, "declared {declared} resources but {owed} are owed")
            }
            ConversionFault::NotConcrete(kind) => {
                write!(f, "{kind} cannot replace a wildcard")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid action: not allowed during {phase:?}")]
    InvalidPhaseAction { phase: TurnPhase },

    #[error("it is not {player}'s turn")]
    NotYourTurn { player: PlayerId },

    #[error("not enough resources to satisfy the requirement")]
    NotEnoughRequirement,

    #[error("depot {depot} holds at most {capacity}, cannot reach {requested}")]
    DepotCapacityExceeded {
        depot: usize,
        capacity: u32,
        requested: u32,
    },

    #[error("depot {depot} holds {stored}, cannot take {offered}")]
    DepotTypeMismatch {
        depot: usize,
        stored: ResourceType,
        offered: ResourceType,
    },

    #[error("another depot already holds {resource}")]
    DuplicateDepotType { resource: ResourceType },

    #[error("not enough {resource}: resource count would become negative")]
    NegativeResource { resource: ResourceType },

    #[error("any conversion not possible: {0}")]
    WildcardConversionMismatch(ConversionFault),

    #[error("no {kind} depot at index {index}", kind = depot_kind(.leader))]
    InvalidDepot { index: usize, leader: bool },

    #[error("market has no {kind} {index}", kind = line_kind(.is_row))]
    InvalidMarketLine { index: usize, is_row: bool },

    #[error("cannot convert {requested} white marbles, only {remaining} left")]
    WhiteMarbleOverflow { requested: u32, remaining: u32 },

    #[error("you don't have leaders with marble effects")]
    NoMarbleEffects,

    #[error("no leader at index {0}")]
    InvalidLeader(usize),

    #[error("leader {0} is already active")]
    LeaderAlreadyActive(usize),

    #[error("leader {0} cannot be used for this action")]
    WrongLeaderEffect(usize),

    #[error("this production was already used in the current action")]
    ProductionAlreadyUsed,

    #[error("no production has been selected")]
    NoProductionSelected,

    #[error("card slot {0} cannot host this card")]
    InvalidCardSlot(usize),

    #[error("no development card left at level row {row}, column {col}")]
    EmptyDevelopmentStack { row: usize, col: usize },

    #[error("invalid setup: {0}")]
    InvalidSetup(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

fn depot_kind(leader: &bool) -> &'static str {
    if *leader { "leader" } else { "warehouse" }
}

fn line_kind(is_row: &bool) -> &'static str {
    if *is_row { "row" } else { "column" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_descriptive() {
        let err = EngineError::DepotCapacityExceeded {
            depot: 1,
            capacity: 2,
            requested: 3,
        };
        assert_eq!(err.to_string(), "depot 1 holds at most 2, cannot reach 3");

        let err = EngineError::InvalidDepot { index: 4, leader: true };
        assert_eq!(err.to_string(), "no leader depot at index 4");

        let err = EngineError::InvalidMarketLine { index: 9, is_row: false };
        assert_eq!(err.to_string(), "market has no column 9");
    }

    #[test]
    fn test_conversion_fault_display() {
        let err = EngineError::WildcardConversionMismatch(ConversionFault::Total {
            owed: 2,
            declared: 3,
        });
        assert_eq!(
            err.to_string(),
            "any conversion not possible: declared 3 resources but 2 are owed"
        );
    }
}
