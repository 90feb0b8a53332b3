//! Player actions: representation, execution, and enumeration.

mod enumerate;
mod execute;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::ids::{BuildingId, CardId, EdgeId, LocationId};
use crate::core::player::PlayerId;

/// One turn action, fully parameterized.
///
/// Tile and edge references are IDs into the acting player's roster and
/// the board arenas, so an `Action` is a small plain value that can be
/// stored, serialized, or replayed against an equivalent game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Place `building` on `location`, paying its cost and resources.
    Build { building: BuildingId, location: LocationId },
    /// Build a canal link on `edge`.
    BuildCanal { edge: EdgeId },
    /// Build a single rail link on `edge`.
    BuildRail { edge: EdgeId },
    /// Build two rail links in one action, paying the discounted combined
    /// price plus a beer. `second` may connect through `first`.
    BuildTwoRails { first: EdgeId, second: EdgeId },
    /// Remove two unbuilt tiles from the roster to reach higher tiers.
    Develop { first: BuildingId, second: BuildingId },
    /// Sell the listed market tiles to reachable merchants, in order.
    Sell { buildings: SmallVec<[BuildingId; 4]> },
    /// Take a loan, dropping the income track.
    Loan,
    /// Discard a card for one wild location and one wild industry.
    Scout { discard: CardId },
    /// Do nothing.
    Pass,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Build { building, location } => write!(f, "build {building} at {location}"),
            Action::BuildCanal { edge } => write!(f, "canal on {edge}"),
            Action::BuildRail { edge } => write!(f, "rail on {edge}"),
            Action::BuildTwoRails { first, second } => {
                write!(f, "double rail on {first} and {second}")
            }
            Action::Develop { first, second } => write!(f, "develop {first} and {second}"),
            Action::Sell { buildings } => write!(f, "sell {} tile(s)", buildings.len()),
            Action::Loan => f.write_str("loan"),
            Action::Scout { .. } => f.write_str("scout"),
            Action::Pass => f.write_str("pass"),
        }
    }
}

/// A committed action, as kept in the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    /// Position in the global action sequence, from 0.
    pub sequence: u32,
    pub action: Action,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let action = Action::Build {
            building: BuildingId::new(3),
            location: LocationId::new(7),
        };
        assert_eq!(action.to_string(), "build Building(3) at Location(7)");
        assert_eq!(Action::Pass.to_string(), "pass");
        assert_eq!(
            Action::BuildTwoRails { first: EdgeId::new(1), second: EdgeId::new(2) }.to_string(),
            "double rail on Edge(1) and Edge(2)"
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let action = Action::Sell {
            buildings: smallvec::smallvec![BuildingId::new(4), BuildingId::new(9)],
        };
        let json = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }
}
