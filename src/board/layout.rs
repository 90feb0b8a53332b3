//! Static map data: towns, build slots, links, and trade posts.
//!
//! The tables here are pure description; [`Board::new`] turns them into
//! the indexed arenas the rest of the engine works with. Town indices in
//! this file are the `TownId` values the card deck refers to, so the town
//! order is load-bearing.
//!
//! [`Board::new`]: super::Board::new

use crate::buildings::BuildingKind;

use BuildingKind::{Beer, Coal, Cotton, Goods, Iron, Pottery};

pub(super) struct TownSpec {
    pub name: &'static str,
    /// Allowed industry kinds per build slot.
    pub slots: &'static [&'static [BuildingKind]],
    /// Farm breweries host a single brewery slot and have no cards.
    pub farm: bool,
}

const fn town(name: &'static str, slots: &'static [&'static [BuildingKind]]) -> TownSpec {
    TownSpec { name, slots, farm: false }
}

const fn farm(name: &'static str) -> TownSpec {
    TownSpec { name, slots: &[&[Beer]], farm: true }
}

#[rustfmt::skip]
pub(super) const TOWNS: &[TownSpec] = &[
    town("Leek",               &[&[Cotton, Goods], &[Cotton, Beer]]),
    town("Stoke-on-Trent",     &[&[Pottery, Iron], &[Pottery, Goods], &[Goods, Beer]]),
    town("Stone",              &[&[Coal, Goods], &[Cotton, Beer]]),
    town("Uttoxeter",          &[&[Goods, Beer], &[Cotton, Beer]]),
    town("Belper",             &[&[Cotton, Goods], &[Coal], &[Pottery]]),
    town("Derby",              &[&[Cotton, Beer], &[Cotton, Goods], &[Iron]]),
    town("Stafford",           &[&[Goods, Beer], &[Pottery]]),
    town("Cannock",            &[&[Coal, Goods], &[Coal]]),
    town("Walsall",            &[&[Iron, Goods], &[Goods, Beer]]),
    town("Burton-upon-Trent",  &[&[Goods, Coal], &[Beer]]),
    town("Tamworth",           &[&[Cotton, Coal], &[Cotton, Coal]]),
    town("Wolverhampton",      &[&[Goods], &[Goods, Coal]]),
    town("Coalbrookdale",      &[&[Iron, Beer], &[Iron], &[Coal]]),
    town("Dudley",             &[&[Coal], &[Iron]]),
    town("Kidderminster",      &[&[Cotton, Coal], &[Cotton]]),
    town("Worcester",          &[&[Cotton], &[Cotton]]),
    town("Nuneaton",           &[&[Goods, Beer], &[Cotton, Coal]]),
    town("Birmingham",         &[&[Cotton, Goods], &[Goods], &[Iron], &[Goods]]),
    town("Coventry",           &[&[Pottery], &[Goods, Coal], &[Iron, Goods]]),
    town("Redditch",           &[&[Goods, Coal], &[Iron]]),
    farm("Farm Brewery North"),
    farm("Farm Brewery South"),
];

pub(super) struct PostSpec {
    pub name: &'static str,
    /// Merchant tile slots.
    pub slots: usize,
    /// Victory points per link adjacent to this post.
    pub network_points: i32,
    /// Inactive below this player count.
    pub min_players: usize,
}

pub(super) const POSTS: &[PostSpec] = &[
    PostSpec { name: "Shrewsbury", slots: 1, network_points: 4, min_players: 2 },
    PostSpec { name: "Gloucester", slots: 2, network_points: 2, min_players: 2 },
    PostSpec { name: "Oxford", slots: 2, network_points: 2, min_players: 2 },
    PostSpec { name: "Nottingham", slots: 2, network_points: 2, min_players: 3 },
    PostSpec { name: "Warrington", slots: 2, network_points: 2, min_players: 4 },
];

/// Edge endpoint in the static tables: a town or trade-post index.
#[derive(Clone, Copy)]
pub(super) enum End {
    T(usize),
    P(usize),
}

pub(super) struct EdgeSpec {
    pub a: End,
    pub b: End,
    pub canal: bool,
    pub rail: bool,
}

const fn link(a: End, b: End) -> EdgeSpec {
    EdgeSpec { a, b, canal: true, rail: true }
}

const fn rail_link(a: End, b: End) -> EdgeSpec {
    EdgeSpec { a, b, canal: false, rail: true }
}

const fn canal_link(a: End, b: End) -> EdgeSpec {
    EdgeSpec { a, b, canal: true, rail: false }
}

use End::{P, T};

#[rustfmt::skip]
pub(super) const EDGES: &[EdgeSpec] = &[
    link(T(0), T(1)),            // Leek - Stoke-on-Trent
    rail_link(T(0), T(4)),       // Leek - Belper
    link(T(1), T(2)),            // Stoke-on-Trent - Stone
    rail_link(T(1), P(4)),       // Stoke-on-Trent - Warrington
    link(T(2), T(6)),            // Stone - Stafford
    link(T(2), T(9)),            // Stone - Burton-upon-Trent
    rail_link(T(2), T(3)),       // Stone - Uttoxeter
    rail_link(T(3), T(5)),       // Uttoxeter - Derby
    link(T(4), T(5)),            // Belper - Derby
    link(T(5), P(3)),            // Derby - Nottingham
    link(T(5), T(9)),            // Derby - Burton-upon-Trent
    link(T(6), T(7)),            // Stafford - Cannock
    link(T(7), T(8)),            // Cannock - Walsall
    link(T(7), T(11)),           // Cannock - Wolverhampton
    link(T(7), T(20)),           // Cannock - Farm Brewery North
    canal_link(T(8), T(9)),      // Walsall - Burton-upon-Trent
    link(T(8), T(11)),           // Walsall - Wolverhampton
    link(T(9), T(10)),           // Burton-upon-Trent - Tamworth
    rail_link(T(10), T(16)),     // Tamworth - Nuneaton
    link(T(10), T(17)),          // Tamworth - Birmingham
    link(T(11), T(12)),          // Wolverhampton - Coalbrookdale
    link(T(11), T(13)),          // Wolverhampton - Dudley
    link(T(12), P(0)),           // Coalbrookdale - Shrewsbury
    link(T(12), T(14)),          // Coalbrookdale - Kidderminster
    link(T(13), T(14)),          // Dudley - Kidderminster
    link(T(13), T(17)),          // Dudley - Birmingham
    link(T(14), T(21)),          // Kidderminster - Farm Brewery South
    link(T(21), T(15)),          // Farm Brewery South - Worcester
    link(T(15), P(1)),           // Worcester - Gloucester
    link(T(15), T(17)),          // Worcester - Birmingham
    link(T(17), P(2)),           // Birmingham - Oxford
    link(T(17), T(18)),          // Birmingham - Coventry
    rail_link(T(17), T(16)),     // Birmingham - Nuneaton
    rail_link(T(17), T(19)),     // Birmingham - Redditch
    link(T(18), P(2)),           // Coventry - Oxford
    link(T(16), T(18)),          // Nuneaton - Coventry
    link(T(19), P(1)),           // Redditch - Gloucester
];

/// Printed face of a merchant tile. A non-empty merchant stocks one beer
/// barrel on its post at setup and at the era transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MerchantGood {
    Any,
    Goods,
    Cotton,
    Pottery,
    Empty,
}

/// Merchant tile pool; a tile enters the deal at its minimum player count.
pub(super) const MERCHANT_POOL: &[(MerchantGood, usize)] = &[
    (MerchantGood::Any, 2),
    (MerchantGood::Cotton, 2),
    (MerchantGood::Goods, 2),
    (MerchantGood::Empty, 2),
    (MerchantGood::Empty, 2),
    (MerchantGood::Pottery, 3),
    (MerchantGood::Empty, 3),
    (MerchantGood::Goods, 4),
    (MerchantGood::Cotton, 4),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_town_count() {
        assert_eq!(TOWNS.len(), 22);
        assert_eq!(TOWNS.iter().filter(|t| t.farm).count(), 2);
    }

    #[test]
    fn test_edge_endpoints_in_range() {
        for edge in EDGES {
            for end in [edge.a, edge.b] {
                match end {
                    End::T(i) => assert!(i < TOWNS.len()),
                    End::P(i) => assert!(i < POSTS.len()),
                }
            }
            assert!(edge.canal || edge.rail);
        }
    }

    #[test]
    fn test_merchant_pool_matches_post_slots() {
        for players in 2..=4 {
            let slots: usize = POSTS
                .iter()
                .filter(|p| p.min_players <= players)
                .map(|p| p.slots)
                .sum();
            let tiles = MERCHANT_POOL.iter().filter(|(_, min)| *min <= players).count();
            assert_eq!(slots, tiles, "{players} players");
        }
    }

    #[test]
    fn test_farms_only_host_breweries() {
        for town in TOWNS.iter().filter(|t| t.farm) {
            assert_eq!(town.slots, &[&[BuildingKind::Beer]]);
        }
    }
}
