//! Connectivity and availability queries over the link network.
//!
//! Everything here is read-only. Legality checks that need to ask "would
//! this work once my rail exists?" pass the candidate edge as `extra`
//! instead of mutating the network and rolling back.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use super::{Board, Node, ResourceSource};
use crate::buildings::BuildingKind;
use crate::core::ids::EdgeId;
use crate::core::player::{PlayerId, PlayerMap, PlayerState};

impl Board {
    fn edges_at(&self, node: Node) -> &[EdgeId] {
        match node {
            Node::Town(t) => self.town(t).edges(),
            Node::TradePost(p) => self.post(p).edges(),
        }
    }

    /// All nodes reachable from `from` over built links, with every edge
    /// in `extras` counted as built. Breadth-first.
    fn reachable(&self, from: Node, extras: &[EdgeId]) -> FxHashSet<Node> {
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::from([from]);
        seen.insert(from);
        while let Some(node) = queue.pop_front() {
            for &edge_id in self.edges_at(node) {
                let edge = self.edge(edge_id);
                if !edge.is_built() && !extras.contains(&edge_id) {
                    continue;
                }
                for &next in &edge.nodes {
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }
        seen
    }

    /// Whether `a` and `b` are connected over built links.
    #[must_use]
    pub fn connected(&self, a: Node, b: Node) -> bool {
        self.connected_with(a, b, None)
    }

    /// Connectivity with one unbuilt edge hypothetically counted as built.
    #[must_use]
    pub fn connected_with(&self, a: Node, b: Node, extra: Option<EdgeId>) -> bool {
        if a == b {
            return true;
        }
        let extras: &[EdgeId] = match &extra {
            Some(e) => std::slice::from_ref(e),
            None => &[],
        };
        self.reachable(a, extras).contains(&b)
    }

    // === Coal ===

    /// Coal sources for an action at `from`: connected mines in board
    /// order, then the market if an active trade post is reachable.
    pub(super) fn coal_sources(
        &self,
        players: &PlayerMap<PlayerState>,
        from: Node,
        extras: &[EdgeId],
    ) -> Vec<ResourceSource> {
        let reach = self.reachable(from, extras);
        let mut sources = Vec::new();
        for (_, loc) in self.locations() {
            if !reach.contains(&Node::Town(loc.town)) {
                continue;
            }
            if let Some(p) = loc.occupant {
                let tile = players[p.owner].tile(p.building);
                if tile.kind == BuildingKind::Coal && tile.is_active && tile.resources > 0 {
                    sources.push(ResourceSource::Tile { owner: p.owner, building: p.building });
                }
            }
        }
        if reach
            .iter()
            .any(|n| matches!(n, Node::TradePost(p) if self.post(*p).active))
        {
            sources.push(ResourceSource::Market);
        }
        sources
    }

    /// Whether an active trade post is reachable from `from`. Gates both
    /// market coal purchases and surplus coal sales.
    #[must_use]
    pub fn market_linked(&self, from: Node, extras: &[EdgeId]) -> bool {
        self.reachable(from, extras)
            .iter()
            .any(|n| matches!(n, Node::TradePost(p) if self.post(*p).active))
    }

    /// Cash needed for `units` of coal at `from`, or `None` when the coal
    /// cannot be obtained at all (too few connected mines and no market
    /// connection).
    #[must_use]
    pub fn coal_cost(
        &self,
        players: &PlayerMap<PlayerState>,
        from: Node,
        units: u32,
        extras: &[EdgeId],
    ) -> Option<i64> {
        let mut mined = 0u32;
        let mut market = false;
        for source in self.coal_sources(players, from, extras) {
            match source {
                ResourceSource::Tile { owner, building } => {
                    mined += u32::from(players[owner].tile(building).resources);
                }
                ResourceSource::Market => market = true,
                ResourceSource::Post(_) => {}
            }
        }
        if mined >= units {
            Some(0)
        } else if market {
            Some(self.coal_market.price_for(units - mined))
        } else {
            None
        }
    }

    // === Iron ===

    /// Iron sources: every stocked works on the board in board order, then
    /// the market. Iron needs no connection.
    pub(super) fn iron_sources(&self, players: &PlayerMap<PlayerState>) -> Vec<ResourceSource> {
        let mut sources = Vec::new();
        for (_, loc) in self.locations() {
            if let Some(p) = loc.occupant {
                let tile = players[p.owner].tile(p.building);
                if tile.kind == BuildingKind::Iron && tile.is_active && tile.resources > 0 {
                    sources.push(ResourceSource::Tile { owner: p.owner, building: p.building });
                }
            }
        }
        sources.push(ResourceSource::Market);
        sources
    }

    /// Cash needed for `units` of iron. Always obtainable.
    #[must_use]
    pub fn iron_cost(&self, players: &PlayerMap<PlayerState>, units: u32) -> i64 {
        let mut stocked = 0u32;
        for source in self.iron_sources(players) {
            if let ResourceSource::Tile { owner, building } = source {
                stocked += u32::from(players[owner].tile(building).resources);
            }
        }
        if stocked >= units {
            0
        } else {
            self.iron_market.price_for(units - stocked)
        }
    }

    // === Beer ===

    /// Beer sources for `payer` acting at `from`: breweries in board order
    /// (own ones from anywhere, opponents' only when connected), then —
    /// when `use_posts` is set (selling only) — barrels on every reachable
    /// active trade post, in post order.
    pub(super) fn beer_sources(
        &self,
        players: &PlayerMap<PlayerState>,
        payer: PlayerId,
        from: Node,
        use_posts: bool,
        extras: &[EdgeId],
    ) -> Vec<ResourceSource> {
        let reach = self.reachable(from, extras);
        let mut sources = Vec::new();
        for (_, loc) in self.locations() {
            if let Some(p) = loc.occupant {
                let tile = players[p.owner].tile(p.building);
                if tile.kind != BuildingKind::Beer || !tile.is_active || tile.resources == 0 {
                    continue;
                }
                if p.owner == payer || reach.contains(&Node::Town(loc.town)) {
                    sources.push(ResourceSource::Tile { owner: p.owner, building: p.building });
                }
            }
        }
        if use_posts {
            for (id, post) in self.posts() {
                if post.active && post.beer > 0 && reach.contains(&Node::TradePost(id)) {
                    sources.push(ResourceSource::Post(id));
                }
            }
        }
        sources
    }

    /// Whether `units` of beer can be mustered. Beer is never bought.
    #[must_use]
    pub fn beer_available(
        &self,
        players: &PlayerMap<PlayerState>,
        payer: PlayerId,
        from: Node,
        units: u32,
        use_posts: bool,
        extras: &[EdgeId],
    ) -> bool {
        let mut found = 0u32;
        for source in self.beer_sources(players, payer, from, use_posts, extras) {
            match source {
                ResourceSource::Tile { owner, building } => {
                    found += u32::from(players[owner].tile(building).resources);
                }
                ResourceSource::Post(post) => found += u32::from(self.post(post).beer),
                ResourceSource::Market => {}
            }
            if found >= units {
                return true;
            }
        }
        found >= units
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Link, LinkKind, Placed};
    use crate::buildings::roster;
    use crate::core::ids::{TownId, TradePostId};
    use crate::core::rng::GameRng;
    use crate::core::player::PlayerState;

    fn board() -> Board {
        let mut rng = GameRng::new(5);
        Board::new(2, &mut rng)
    }

    fn players() -> PlayerMap<PlayerState> {
        PlayerMap::new(2, |_| PlayerState::new(roster()))
    }

    fn edge_between(b: &Board, x: Node, y: Node) -> EdgeId {
        b.edges()
            .find(|(_, e)| e.touches(x) && e.touches(y))
            .map(|(id, _)| id)
            .unwrap()
    }

    fn build_link(b: &mut Board, edge: EdgeId, owner: PlayerId) {
        b.edge_mut(edge).link = Some(Link { owner, kind: LinkKind::Canal });
    }

    const CANNOCK: Node = Node::Town(TownId::new(7));
    const WALSALL: Node = Node::Town(TownId::new(8));
    const WOLVERHAMPTON: Node = Node::Town(TownId::new(11));

    #[test]
    fn test_unlinked_board_is_disconnected() {
        let b = board();
        assert!(!b.connected(CANNOCK, WALSALL));
        assert!(b.connected(CANNOCK, CANNOCK));
    }

    #[test]
    fn test_links_connect_transitively() {
        let mut b = board();
        let p0 = PlayerId::new(0);
        let e1 = edge_between(&b, CANNOCK, WALSALL);
        build_link(&mut b, e1, p0);
        let e2 = edge_between(&b, WALSALL, WOLVERHAMPTON);
        build_link(&mut b, e2, p0);

        assert!(b.connected(CANNOCK, WOLVERHAMPTON));
        assert!(b.connected(WOLVERHAMPTON, CANNOCK));
        assert!(!b.connected(CANNOCK, Node::Town(TownId::new(0))));
    }

    #[test]
    fn test_connected_with_probes_without_mutation() {
        let mut b = board();
        let p0 = PlayerId::new(0);
        let e = edge_between(&b, WALSALL, WOLVERHAMPTON);
        build_link(&mut b, e, p0);
        let candidate = edge_between(&b, CANNOCK, WALSALL);

        assert!(!b.connected(CANNOCK, WOLVERHAMPTON));
        assert!(b.connected_with(CANNOCK, WOLVERHAMPTON, Some(candidate)));
        // The probe left the edge unbuilt.
        assert!(!b.edge(candidate).is_built());
        assert!(!b.connected(CANNOCK, WOLVERHAMPTON));
    }

    #[test]
    fn test_coal_needs_connection() {
        let mut b = board();
        let mut ps = players();
        let p0 = PlayerId::new(0);

        let mine = ps[p0].lowest_unplaced(BuildingKind::Coal).unwrap();
        let slot = b.town(TownId::new(7)).locations()[0];
        ps[p0].tile_mut(mine).place(slot);
        b.location_mut(slot).occupant = Some(Placed { owner: p0, building: mine });

        // Walsall is not linked to Cannock: no mine, no market.
        assert_eq!(b.coal_cost(&ps, WALSALL, 1, &[]), None);

        let e = edge_between(&b, CANNOCK, WALSALL);
        build_link(&mut b, e, p0);
        assert_eq!(b.coal_cost(&ps, WALSALL, 1, &[]), Some(0));
        // Two units from the mine, remainder would need a market.
        assert_eq!(b.coal_cost(&ps, WALSALL, 3, &[]), None);
    }

    #[test]
    fn test_coal_market_via_trade_post() {
        let mut b = board();
        let ps = players();
        let p0 = PlayerId::new(0);

        let coalbrookdale = Node::Town(TownId::new(12));
        let shrewsbury = Node::TradePost(TradePostId::new(0));
        let e = edge_between(&b, coalbrookdale, shrewsbury);
        build_link(&mut b, e, p0);

        // No mines anywhere; the market supplies through the post.
        assert_eq!(b.coal_cost(&ps, coalbrookdale, 2, &[]), Some(b.coal_market.price_for(2)));
    }

    #[test]
    fn test_iron_ignores_connectivity() {
        let mut b = board();
        let mut ps = players();
        let p0 = PlayerId::new(0);

        // Market-only price from an isolated town.
        assert_eq!(b.iron_cost(&ps, 1), b.iron_market.price_for(1));

        let works = ps[p0].lowest_unplaced(BuildingKind::Iron).unwrap();
        let slot = b.town(TownId::new(5)).locations()[2];
        ps[p0].tile_mut(works).place(slot);
        b.location_mut(slot).occupant = Some(Placed { owner: p0, building: works });

        // The unconnected works supplies for free.
        assert_eq!(b.iron_cost(&ps, 2), 0);
    }

    #[test]
    fn test_beer_own_anywhere_opponent_connected() {
        let mut b = board();
        let mut ps = players();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        // An opponent brewery in Burton, unconnected to Cannock.
        let brewery = ps[p1].lowest_unplaced(BuildingKind::Beer).unwrap();
        let slot = b.town(TownId::new(9)).locations()[1];
        ps[p1].tile_mut(brewery).place(slot);
        b.location_mut(slot).occupant = Some(Placed { owner: p1, building: brewery });

        assert!(!b.beer_available(&ps, p0, CANNOCK, 1, false, &[]));
        // The owner can use it from anywhere.
        assert!(b.beer_available(&ps, p1, CANNOCK, 1, false, &[]));
    }

    #[test]
    fn test_post_beer_only_when_selling_and_reachable() {
        let mut b = board();
        let ps = players();
        let p0 = PlayerId::new(0);

        let coalbrookdale = Node::Town(TownId::new(12));
        let shrewsbury = TradePostId::new(0);
        b.post_mut(shrewsbury).beer = 1;

        // Unreachable barrels don't count even when selling.
        assert!(!b.beer_available(&ps, p0, coalbrookdale, 1, true, &[]));

        let e = edge_between(&b, coalbrookdale, Node::TradePost(shrewsbury));
        build_link(&mut b, e, p0);
        assert!(b.beer_available(&ps, p0, coalbrookdale, 1, true, &[]));
        // Post barrels are off limits outside a sale.
        assert!(!b.beer_available(&ps, p0, coalbrookdale, 1, false, &[]));
    }
}
