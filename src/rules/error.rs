//! Error taxonomy for the rules layer.
//!
//! Illegal requests never mutate game state: every predicate and executor
//! returns one of these instead of panicking, so a driver probing moves can
//! treat an `Err` as "not available" and carry on.

use thiserror::Error;

use crate::board::market::ResourceKind;
use crate::core::ids::{CardId, EdgeId, LocationId};
use crate::core::player::PlayerId;

/// A charge the paying player cannot cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("needs {needed}, only {available} at hand")]
pub struct InsufficientFunds {
    pub needed: i64,
    pub available: i64,
}

/// Why a requested action is not legal in the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error(transparent)]
    Funds(#[from] InsufficientFunds),
    #[error("{0} is already occupied")]
    LocationOccupied(LocationId),
    #[error("this slot does not accept the industry")]
    KindNotAllowed,
    #[error("tile cannot be built in this era")]
    WrongEra,
    #[error("a second tile in one town is not allowed in the canal era")]
    OneTilePerTown,
    #[error("no such tile is available to build")]
    TileUnavailable,
    #[error("{0} already carries a link")]
    EdgeAlreadyBuilt(EdgeId),
    #[error("no canal may be built on {0}")]
    EdgeNotCanal(EdgeId),
    #[error("no rail may be built on {0}")]
    EdgeNotRail(EdgeId),
    #[error("out of link tokens")]
    NoLinkTokens,
    #[error("{0} cannot be obtained from here")]
    ResourceUnreachable(ResourceKind),
    #[error("tile cannot be developed away")]
    NotDevelopable,
    #[error("the two develop picks must differ")]
    SameTile,
    #[error("the two links must differ")]
    SameEdge,
    #[error("tile is not a market industry")]
    NotAMarketTile,
    #[error("tile is not on the board")]
    TileNotActive,
    #[error("tile is already flipped")]
    AlreadyFlipped,
    #[error("income level is too low for another loan")]
    IncomeTooLow,
    #[error("{0} is not in hand")]
    CardNotInHand(CardId),
    #[error("already holding wild cards")]
    AlreadyHoldsWild,
    #[error("nothing selected to sell")]
    EmptySale,
}

/// Failure while consuming resources for an already-vetted action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("not enough {0} within reach")]
    Exhausted(ResourceKind),
    #[error(transparent)]
    Funds(#[from] InsufficientFunds),
}

/// Any way an action request can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Illegal(#[from] RuleViolation),
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl From<InsufficientFunds> for ActionError {
    fn from(err: InsufficientFunds) -> Self {
        ActionError::Illegal(RuleViolation::Funds(err))
    }
}

/// Why an era cannot end yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EraError {
    #[error("{0} cards are still undrawn")]
    DeckNotExhausted(usize),
    #[error("{0} still holds cards")]
    HandsNotEmpty(PlayerId),
    #[error("the game is already in the rail era")]
    AlreadyRailEra,
    #[error("the rail era has not started")]
    NotRailEra,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = InsufficientFunds { needed: 12, available: 5 };
        assert_eq!(err.to_string(), "needs 12, only 5 at hand");

        let err = RuleViolation::ResourceUnreachable(ResourceKind::Coal);
        assert_eq!(err.to_string(), "coal cannot be obtained from here");

        let err = RuleViolation::EdgeNotCanal(EdgeId::new(4));
        assert_eq!(err.to_string(), "no canal may be built on Edge(4)");
    }

    #[test]
    fn test_funds_conversion_chain() {
        let funds = InsufficientFunds { needed: 3, available: 0 };
        let action: ActionError = funds.into();
        assert_eq!(action, ActionError::Illegal(RuleViolation::Funds(funds)));

        let resource: ResourceError = funds.into();
        let action: ActionError = resource.into();
        assert_eq!(action, ActionError::Resource(ResourceError::Funds(funds)));
    }
}
