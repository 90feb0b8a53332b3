//! Industry tiles: kinds, per-tile stats, lifecycle, and the player roster.
//!
//! A tile carries both its printed stats (cost, resource requirements,
//! points) and its dynamic lifecycle state. Lifecycle:
//!
//! - *unplaced*: in the owner's roster, not on the board;
//! - *active*: placed on a build location, producing or awaiting sale;
//! - *flipped*: sold (market tiles) or drained to zero stock (resource
//!   tiles); stays on the board and scores at era end;
//! - *retired*: removed from play — developed away, overbuilt, or an
//!   obsolete tier-1 tile at the era transition. Terminal.
//!
//! Every player starts with an identical 44-tile roster; ownership never
//! changes, so a tile is addressed everywhere as (`PlayerId`, `BuildingId`).

use serde::{Deserialize, Serialize};

use crate::core::ids::LocationId;

/// Industry kind printed on a tile and on build-location slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    /// Manufactured goods (market tile, 8 tiers).
    Goods,
    /// Cotton mill (market tile).
    Cotton,
    /// Coal mine (resource tile, stocks coal).
    Coal,
    /// Iron works (resource tile, stocks iron).
    Iron,
    /// Brewery (resource tile, stocks beer).
    Beer,
    /// Pottery (market tile).
    Pottery,
}

impl BuildingKind {
    /// Market tiles are sold to merchants; resource tiles are drained.
    #[must_use]
    pub fn is_market(self) -> bool {
        matches!(self, BuildingKind::Goods | BuildingKind::Cotton | BuildingKind::Pottery)
    }

    /// All kinds, in roster order.
    pub const ALL: [BuildingKind; 6] = [
        BuildingKind::Goods,
        BuildingKind::Cotton,
        BuildingKind::Coal,
        BuildingKind::Iron,
        BuildingKind::Beer,
        BuildingKind::Pottery,
    ];
}

impl std::fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BuildingKind::Goods => "goods",
            BuildingKind::Cotton => "cotton",
            BuildingKind::Coal => "coal",
            BuildingKind::Iron => "iron",
            BuildingKind::Beer => "beer",
            BuildingKind::Pottery => "pottery",
        };
        f.write_str(name)
    }
}

/// One industry tile: printed stats plus lifecycle state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Building {
    pub kind: BuildingKind,
    /// Development level; lower tiers must leave the roster first.
    pub tier: u8,
    /// Base build cost in cash.
    pub cost: i64,
    /// Coal consumed when built.
    pub coal_cost: u8,
    /// Iron consumed when built.
    pub iron_cost: u8,
    /// Beer consumed when sold (market tiles only).
    pub beer_cost: u8,
    /// Victory points once flipped.
    pub victory_points: i32,
    /// Income track positions gained when flipped.
    pub income: i32,
    /// Link points this tile contributes to its town.
    pub link_points: i32,
    /// Resource units stocked when placed (resource tiles only).
    pub initial_resources: u8,
    /// Whether the develop action may remove this tile.
    pub developable: bool,
    /// Only buildable during the canal era.
    pub canal_only: bool,
    /// Only buildable during the rail era.
    pub rail_only: bool,

    // Dynamic state.
    /// Remaining resource stock while on the board.
    pub resources: u8,
    /// On the board.
    pub is_active: bool,
    /// Sold or drained; scores at era end.
    pub is_flipped: bool,
    /// Out of play for the rest of the game.
    pub is_retired: bool,
    /// Host location. Set at placement and kept after retirement; whether
    /// the slot itself is free again is tracked on the board.
    pub location: Option<LocationId>,
}

impl Building {
    /// Place the tile on the board.
    pub fn place(&mut self, location: LocationId) {
        self.is_active = true;
        self.resources = self.initial_resources;
        self.location = Some(location);
    }

    /// Flip the tile face-down (sold, or stock exhausted).
    pub fn flip(&mut self) {
        self.is_flipped = true;
    }

    /// Remove the tile from play.
    pub fn retire(&mut self) {
        self.is_active = false;
        self.is_retired = true;
    }

    /// Remove one resource unit; returns true if the stock just hit zero.
    pub fn drain_one(&mut self) -> bool {
        debug_assert!(self.resources > 0, "draining an empty tile");
        self.resources -= 1;
        self.resources == 0
    }
}

struct TileSpec {
    kind: BuildingKind,
    tier: u8,
    copies: u8,
    cost: i64,
    coal: u8,
    iron: u8,
    beer: u8,
    vp: i32,
    income: i32,
    link: i32,
    resources: u8,
    developable: bool,
    canal_only: bool,
    rail_only: bool,
}

const fn tile(
    kind: BuildingKind,
    tier: u8,
    copies: u8,
    cost: i64,
    coal: u8,
    iron: u8,
    beer: u8,
    vp: i32,
    income: i32,
    link: i32,
    resources: u8,
) -> TileSpec {
    TileSpec {
        kind,
        tier,
        copies,
        cost,
        coal,
        iron,
        beer,
        vp,
        income,
        link,
        resources,
        developable: true,
        canal_only: false,
        rail_only: false,
    }
}

const fn undevelopable(mut spec: TileSpec) -> TileSpec {
    spec.developable = false;
    spec
}

const fn canal_only(mut spec: TileSpec) -> TileSpec {
    spec.canal_only = true;
    spec
}

const fn rail_only(mut spec: TileSpec) -> TileSpec {
    spec.rail_only = true;
    spec
}

/// The printed tile set, goods first. 44 tiles per player.
#[rustfmt::skip]
const ROSTER: &[TileSpec] = &[
    // Manufactured goods: 8 tiers, 11 tiles.
    canal_only(tile(BuildingKind::Goods, 1, 1,  8, 1, 0, 1,  3, 5, 2, 0)),
    tile(BuildingKind::Goods,   2, 2, 10, 0, 1, 1,  5, 1, 1, 0),
    tile(BuildingKind::Goods,   3, 1, 12, 2, 0, 1,  4, 4, 0, 0),
    tile(BuildingKind::Goods,   4, 1,  8, 0, 1, 1,  3, 6, 1, 0),
    tile(BuildingKind::Goods,   5, 2, 16, 1, 0, 1,  8, 2, 2, 0),
    tile(BuildingKind::Goods,   6, 1, 20, 0, 0, 1,  7, 6, 1, 0),
    tile(BuildingKind::Goods,   7, 1, 16, 1, 1, 1,  9, 4, 0, 0),
    tile(BuildingKind::Goods,   8, 2, 20, 0, 2, 1, 11, 1, 1, 0),
    // Cotton mills: 4 tiers, 10 tiles.
    tile(BuildingKind::Cotton,  1, 3, 12, 0, 0, 1,  5, 5, 1, 0),
    tile(BuildingKind::Cotton,  2, 2, 14, 1, 0, 1,  5, 4, 2, 0),
    tile(BuildingKind::Cotton,  3, 3, 16, 1, 1, 1,  9, 3, 1, 0),
    tile(BuildingKind::Cotton,  4, 2, 18, 1, 1, 1, 12, 2, 1, 0),
    // Coal mines: 4 tiers, 7 tiles.
    tile(BuildingKind::Coal,    1, 1,  5, 0, 0, 0,  1, 4, 2, 2),
    tile(BuildingKind::Coal,    2, 2,  7, 0, 0, 0,  2, 7, 1, 3),
    tile(BuildingKind::Coal,    3, 2,  8, 0, 1, 0,  3, 6, 1, 4),
    tile(BuildingKind::Coal,    4, 2, 10, 0, 1, 0,  4, 5, 1, 5),
    // Iron works: 4 tiers, 4 tiles.
    tile(BuildingKind::Iron,    1, 1,  5, 1, 0, 0,  3, 3, 1, 4),
    tile(BuildingKind::Iron,    2, 1,  7, 1, 0, 0,  5, 3, 1, 4),
    tile(BuildingKind::Iron,    3, 1,  9, 1, 0, 0,  7, 2, 1, 5),
    tile(BuildingKind::Iron,    4, 1, 12, 1, 0, 0,  9, 1, 1, 6),
    // Breweries: 4 tiers, 7 tiles.
    tile(BuildingKind::Beer,    1, 2,  5, 0, 1, 0,  4, 4, 2, 1),
    tile(BuildingKind::Beer,    2, 2,  7, 0, 1, 0,  5, 5, 2, 1),
    tile(BuildingKind::Beer,    3, 2,  9, 0, 1, 0,  7, 5, 2, 2),
    rail_only(tile(BuildingKind::Beer, 4, 1, 9, 0, 1, 0, 10, 5, 2, 2)),
    // Potteries: 5 tiers, 5 tiles. Tiers 1 and 3 cannot be developed away.
    undevelopable(tile(BuildingKind::Pottery, 1, 1, 17, 0, 1, 1, 10, 5, 1, 0)),
    tile(BuildingKind::Pottery, 2, 1,  0, 1, 0, 1,  1, 1, 1, 0),
    undevelopable(tile(BuildingKind::Pottery, 3, 1, 22, 2, 0, 1, 11, 9, 1, 0)),
    tile(BuildingKind::Pottery, 4, 1,  0, 2, 0, 1,  1, 1, 1, 0),
    rail_only(tile(BuildingKind::Pottery, 5, 1, 24, 2, 0, 1, 20, 5, 1, 0)),
];

/// Build one player's starting roster.
#[must_use]
pub fn roster() -> Vec<Building> {
    let mut tiles = Vec::new();
    for spec in ROSTER {
        for _ in 0..spec.copies {
            tiles.push(Building {
                kind: spec.kind,
                tier: spec.tier,
                cost: spec.cost,
                coal_cost: spec.coal,
                iron_cost: spec.iron,
                beer_cost: spec.beer,
                victory_points: spec.vp,
                income: spec.income,
                link_points: spec.link,
                initial_resources: spec.resources,
                developable: spec.developable,
                canal_only: spec.canal_only,
                rail_only: spec.rail_only,
                resources: 0,
                is_active: false,
                is_flipped: false,
                is_retired: false,
                location: None,
            });
        }
    }
    tiles
}
