//! Board-scoped identifier types.
//!
//! Every board entity lives in an arena on the `Board` (or, for industry
//! tiles, in a player's roster) and is referenced by a typed index. Indices
//! are allocated monotonically per registry when the board is built and are
//! never reused, so they stay valid for the lifetime of a game.
//!
//! There is deliberately no cross-registry "entity" ID: a `TownId` can only
//! index towns, which keeps back-references (town ↔ edge, tile ↔ location)
//! from being mixed up at compile time.

use serde::{Deserialize, Serialize};

/// Index of a town in the board's town arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TownId(pub u16);

/// Index of a trade post in the board's trade-post arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TradePostId(pub u16);

/// Index of a build location in the board's location arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(pub u16);

/// Index of a network edge (canal/rail slot) in the board's edge arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u16);

/// Index of an industry tile in its owner's roster.
///
/// A `BuildingId` is only meaningful together with the owning player; the
/// board stores both wherever a placed tile is referenced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuildingId(pub u16);

/// Identifier of a card, unique within one deck (wilds included).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

macro_rules! id_impls {
    ($ty:ident, $raw:ty, $label:literal) => {
        impl $ty {
            /// Create an ID from a raw index.
            #[must_use]
            pub const fn new(raw: $raw) -> Self {
                Self(raw)
            }

            /// Get the raw index, for arena lookups.
            #[must_use]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

id_impls!(TownId, u16, "Town");
id_impls!(TradePostId, u16, "TradePost");
id_impls!(LocationId, u16, "Location");
id_impls!(EdgeId, u16, "Edge");
id_impls!(BuildingId, u16, "Building");
id_impls!(CardId, u32, "Card");
