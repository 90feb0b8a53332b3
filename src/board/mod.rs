//! The shared board: towns, build slots, the link network, trade posts,
//! and the coal and iron markets.
//!
//! The board is a flat arena per entity class (towns, build locations,
//! network edges, trade posts), each addressed by its own ID type. Placed
//! tiles are stored as back-references into the owning player's roster, so
//! cloning a board never duplicates tile state.

pub mod graph;
pub mod layout;
pub mod market;

pub use layout::MerchantGood;
pub use market::{ResourceKind, ResourceMarket};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::buildings::BuildingKind;
use crate::core::ids::{BuildingId, EdgeId, LocationId, TownId, TradePostId};
use crate::core::player::{PlayerId, PlayerMap, PlayerState};
use crate::core::rng::GameRng;
use crate::rules::ResourceError;

/// The two halves of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Era {
    Canal,
    Rail,
}

impl std::fmt::Display for Era {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Era::Canal => f.write_str("canal era"),
            Era::Rail => f.write_str("rail era"),
        }
    }
}

/// A network endpoint: a town or a trade post.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Node {
    Town(TownId),
    TradePost(TradePostId),
}

/// A town with its build slots and adjacent edges.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Town {
    pub name: String,
    locations: SmallVec<[LocationId; 4]>,
    edges: SmallVec<[EdgeId; 6]>,
    /// Farm breweries host a single brewery slot and have no cards.
    pub is_farm: bool,
}

impl Town {
    /// Build slots in this town.
    #[must_use]
    pub fn locations(&self) -> &[LocationId] {
        &self.locations
    }

    /// Edges touching this town.
    #[must_use]
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }
}

/// A tile placed on the board: a back-reference into a player's roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placed {
    pub owner: PlayerId,
    pub building: BuildingId,
}

/// One build slot in a town.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildLocation {
    pub town: TownId,
    /// Industry kinds this slot accepts.
    pub allowed: SmallVec<[BuildingKind; 3]>,
    pub occupant: Option<Placed>,
}

/// A built link token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub owner: PlayerId,
    pub kind: LinkKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    Canal,
    Rail,
}

/// A potential link between two nodes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub nodes: [Node; 2],
    /// A canal may be built here.
    pub canal: bool,
    /// A rail may be built here.
    pub rail: bool,
    pub link: Option<Link>,
}

impl NetworkEdge {
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.link.is_some()
    }

    /// Whether a link may be built here in `era`.
    #[must_use]
    pub fn buildable_in(&self, era: Era) -> bool {
        match era {
            Era::Canal => self.canal,
            Era::Rail => self.rail,
        }
    }

    /// Whether `node` is an endpoint.
    #[must_use]
    pub fn touches(&self, node: Node) -> bool {
        self.nodes[0] == node || self.nodes[1] == node
    }
}

/// An off-map trade post with its dealt merchant tiles and beer barrels.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TradePost {
    pub name: String,
    edges: SmallVec<[EdgeId; 3]>,
    /// Merchant tiles dealt at setup, one per slot.
    pub merchants: SmallVec<[MerchantGood; 2]>,
    /// Beer barrels currently on the post.
    pub beer: u8,
    starting_beer: u8,
    /// Victory points per adjacent link at era scoring.
    pub network_points: i32,
    /// Inactive posts (below the player-count threshold) take no part.
    pub active: bool,
}

impl TradePost {
    /// Edges touching this post.
    #[must_use]
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }
}

/// Where one unit of a resource comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceSource {
    /// A resource tile on the board.
    Tile { owner: PlayerId, building: BuildingId },
    /// The shared coal or iron market.
    Market,
    /// Beer barrels on a trade post.
    Post(TradePostId),
}

/// The shared game board.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    pub era: Era,
    towns: Vec<Town>,
    locations: Vec<BuildLocation>,
    edges: Vec<NetworkEdge>,
    posts: Vec<TradePost>,
    pub coal_market: ResourceMarket,
    pub iron_market: ResourceMarket,
}

impl Board {
    /// Set up the board for `player_count` players, dealing merchant tiles
    /// from `rng`.
    #[must_use]
    pub fn new(player_count: usize, rng: &mut GameRng) -> Self {
        let mut towns = Vec::with_capacity(layout::TOWNS.len());
        let mut locations = Vec::new();
        for (i, spec) in layout::TOWNS.iter().enumerate() {
            let town_id = TownId::new(i as u16);
            let mut slots = SmallVec::new();
            for allowed in spec.slots {
                slots.push(LocationId::new(locations.len() as u16));
                locations.push(BuildLocation {
                    town: town_id,
                    allowed: allowed.iter().copied().collect(),
                    occupant: None,
                });
            }
            towns.push(Town {
                name: spec.name.to_string(),
                locations: slots,
                edges: SmallVec::new(),
                is_farm: spec.farm,
            });
        }

        let mut posts: Vec<TradePost> = layout::POSTS
            .iter()
            .map(|spec| TradePost {
                name: spec.name.to_string(),
                edges: SmallVec::new(),
                merchants: SmallVec::new(),
                beer: 0,
                starting_beer: 0,
                network_points: spec.network_points,
                active: spec.min_players <= player_count,
            })
            .collect();

        let mut edges = Vec::with_capacity(layout::EDGES.len());
        for spec in layout::EDGES {
            let id = EdgeId::new(edges.len() as u16);
            let mut resolve = |end| match end {
                layout::End::T(i) => {
                    towns[i].edges.push(id);
                    Node::Town(TownId::new(i as u16))
                }
                layout::End::P(i) => {
                    posts[i].edges.push(id);
                    Node::TradePost(TradePostId::new(i as u16))
                }
            };
            let nodes = [resolve(spec.a), resolve(spec.b)];
            edges.push(NetworkEdge {
                nodes,
                canal: spec.canal,
                rail: spec.rail,
                link: None,
            });
        }

        // Deal merchant tiles to the active posts. A post gets one beer
        // barrel per non-empty merchant.
        let mut pool: Vec<MerchantGood> = layout::MERCHANT_POOL
            .iter()
            .filter(|(_, min)| *min <= player_count)
            .map(|(good, _)| *good)
            .collect();
        rng.shuffle(&mut pool);
        for (i, post) in posts.iter_mut().enumerate() {
            if !post.active {
                continue;
            }
            for _ in 0..layout::POSTS[i].slots {
                let good = pool.pop().unwrap_or(MerchantGood::Empty);
                if good != MerchantGood::Empty {
                    post.beer += 1;
                }
                post.merchants.push(good);
            }
            post.starting_beer = post.beer;
        }

        Self {
            era: Era::Canal,
            towns,
            locations,
            edges,
            posts,
            coal_market: ResourceMarket::coal(),
            iron_market: ResourceMarket::iron(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn town(&self, id: TownId) -> &Town {
        &self.towns[id.index()]
    }

    pub fn towns(&self) -> impl Iterator<Item = (TownId, &Town)> {
        self.towns
            .iter()
            .enumerate()
            .map(|(i, t)| (TownId::new(i as u16), t))
    }

    #[must_use]
    pub fn location(&self, id: LocationId) -> &BuildLocation {
        &self.locations[id.index()]
    }

    pub fn location_mut(&mut self, id: LocationId) -> &mut BuildLocation {
        &mut self.locations[id.index()]
    }

    pub fn locations(&self) -> impl Iterator<Item = (LocationId, &BuildLocation)> {
        self.locations
            .iter()
            .enumerate()
            .map(|(i, l)| (LocationId::new(i as u16), l))
    }

    #[must_use]
    pub fn edge(&self, id: EdgeId) -> &NetworkEdge {
        &self.edges[id.index()]
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> &mut NetworkEdge {
        &mut self.edges[id.index()]
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &NetworkEdge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeId::new(i as u16), e))
    }

    #[must_use]
    pub fn post(&self, id: TradePostId) -> &TradePost {
        &self.posts[id.index()]
    }

    pub fn post_mut(&mut self, id: TradePostId) -> &mut TradePost {
        &mut self.posts[id.index()]
    }

    pub fn posts(&self) -> impl Iterator<Item = (TradePostId, &TradePost)> {
        self.posts
            .iter()
            .enumerate()
            .map(|(i, p)| (TradePostId::new(i as u16), p))
    }

    // === Consumption ===

    /// Consume `units` of coal for an action at `from`, cheapest-first:
    /// connected mines are drained free, then the market is charged for the
    /// whole remainder (which needs a market connection).
    ///
    /// Edges in `extras` count as built for connectivity, so a rail under
    /// construction can fuel itself. Returns the cash spent.
    pub fn consume_coal(
        &mut self,
        players: &mut PlayerMap<PlayerState>,
        payer: PlayerId,
        from: Node,
        units: u32,
        extras: &[EdgeId],
    ) -> Result<i64, ResourceError> {
        let sources = self.coal_sources(players, from, extras);
        self.drain(players, payer, ResourceKind::Coal, &sources, units)
    }

    /// Consume `units` of iron. Iron travels freely: any works on the board
    /// may supply it, and the market needs no connection.
    pub fn consume_iron(
        &mut self,
        players: &mut PlayerMap<PlayerState>,
        payer: PlayerId,
        units: u32,
    ) -> Result<i64, ResourceError> {
        let sources = self.iron_sources(players);
        self.drain(players, payer, ResourceKind::Iron, &sources, units)
    }

    /// Consume `units` of beer for `payer` acting at `from`.
    ///
    /// Own breweries work from anywhere; opponents' breweries must be
    /// connected; `use_posts` additionally opens the barrels of every
    /// reachable trade post (selling only). Beer is never bought for cash.
    pub fn consume_beer(
        &mut self,
        players: &mut PlayerMap<PlayerState>,
        payer: PlayerId,
        from: Node,
        units: u32,
        use_posts: bool,
        extras: &[EdgeId],
    ) -> Result<i64, ResourceError> {
        let sources = self.beer_sources(players, payer, from, use_posts, extras);
        self.drain(players, payer, ResourceKind::Beer, &sources, units)
    }

    /// Drain `units` from `sources` in order. Tiles and post barrels go
    /// unit-by-unit; the market charges for the whole remainder at once.
    fn drain(
        &mut self,
        players: &mut PlayerMap<PlayerState>,
        payer: PlayerId,
        kind: ResourceKind,
        sources: &[ResourceSource],
        units: u32,
    ) -> Result<i64, ResourceError> {
        let mut left = units;
        let mut spent = 0;
        for &source in sources {
            if left == 0 {
                break;
            }
            match source {
                ResourceSource::Tile { owner, building } => {
                    let mut flipped_income = None;
                    let tile = players[owner].tile_mut(building);
                    while left > 0 && tile.resources > 0 {
                        if tile.drain_one() {
                            tile.flip();
                            flipped_income = Some(tile.income);
                        }
                        left -= 1;
                    }
                    if let Some(income) = flipped_income {
                        players[owner].income += income;
                    }
                }
                ResourceSource::Post(post) => {
                    while left > 0 && self.posts[post.index()].beer > 0 {
                        self.posts[post.index()].beer -= 1;
                        left -= 1;
                    }
                }
                ResourceSource::Market => {
                    let market = match kind {
                        ResourceKind::Coal => &mut self.coal_market,
                        ResourceKind::Iron => &mut self.iron_market,
                        ResourceKind::Beer => unreachable!("beer has no market"),
                    };
                    let cost = market.price_for(left);
                    players[payer].charge(cost)?;
                    market.take(left);
                    spent += cost;
                    left = 0;
                }
            }
        }
        if left > 0 {
            return Err(ResourceError::Exhausted(kind));
        }
        Ok(spent)
    }

    // === Era transition ===

    /// Remove every link from the network (canal era scoring).
    pub fn clear_links(&mut self) {
        for edge in &mut self.edges {
            edge.link = None;
        }
    }

    /// Restock trade-post beer barrels for the rail era.
    pub fn reset_merchant_beer(&mut self) {
        for post in &mut self.posts {
            post.beer = post.starting_beer;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::roster;

    fn board(players: usize) -> Board {
        let mut rng = GameRng::new(3);
        Board::new(players, &mut rng)
    }

    fn players(n: usize) -> PlayerMap<PlayerState> {
        PlayerMap::new(n, |_| PlayerState::new(roster()))
    }

    #[test]
    fn test_setup_counts() {
        let b = board(2);
        assert_eq!(b.towns().count(), 22);
        assert_eq!(b.edges().count(), layout::EDGES.len());
        assert_eq!(b.era, Era::Canal);
        assert_eq!(b.coal_market.remaining(), 13);
        assert_eq!(b.iron_market.remaining(), 8);
    }

    #[test]
    fn test_active_posts_scale_with_players() {
        let active = |b: &Board| b.posts().filter(|(_, p)| p.active).count();
        assert_eq!(active(&board(2)), 3);
        assert_eq!(active(&board(3)), 4);
        assert_eq!(active(&board(4)), 5);
    }

    #[test]
    fn test_merchants_dealt_to_active_posts() {
        let b = board(3);
        for (_, post) in b.posts() {
            if post.active {
                assert!(!post.merchants.is_empty());
                let stocked = post.merchants.iter().filter(|m| **m != MerchantGood::Empty).count();
                assert_eq!(post.beer as usize, stocked);
            } else {
                assert!(post.merchants.is_empty());
            }
        }
    }

    #[test]
    fn test_merchant_deal_is_seeded() {
        let mut rng1 = GameRng::new(9);
        let mut rng2 = GameRng::new(9);
        let a = Board::new(4, &mut rng1);
        let b = Board::new(4, &mut rng2);
        for ((_, pa), (_, pb)) in a.posts().zip(b.posts()) {
            assert_eq!(pa.merchants, pb.merchants);
        }
    }

    #[test]
    fn test_town_edge_backrefs() {
        let b = board(2);
        for (id, town) in b.towns() {
            for &edge in town.edges() {
                assert!(b.edge(edge).touches(Node::Town(id)));
            }
        }
    }

    #[test]
    fn test_consume_coal_prefers_tiles() {
        let mut b = board(2);
        let mut ps = players(2);
        let p0 = PlayerId::new(0);

        // Place a stocked mine in Cannock.
        let mine = ps[p0].lowest_unplaced(BuildingKind::Coal).unwrap();
        let slot = b.town(TownId::new(7)).locations()[0];
        ps[p0].tile_mut(mine).place(slot);
        b.location_mut(slot).occupant = Some(Placed { owner: p0, building: mine });

        let spent = b
            .consume_coal(&mut ps, p0, Node::Town(TownId::new(7)), 1, &[])
            .unwrap();
        assert_eq!(spent, 0);
        assert_eq!(ps[p0].tile(mine).resources, 1);
        assert_eq!(b.coal_market.remaining(), 13);
    }

    #[test]
    fn test_draining_tile_flips_and_bumps_income() {
        let mut b = board(2);
        let mut ps = players(2);
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        let mine = ps[p1].lowest_unplaced(BuildingKind::Coal).unwrap();
        let slot = b.town(TownId::new(7)).locations()[0];
        ps[p1].tile_mut(mine).place(slot);
        b.location_mut(slot).occupant = Some(Placed { owner: p1, building: mine });

        let income_before = ps[p1].income;
        b.consume_coal(&mut ps, p0, Node::Town(TownId::new(7)), 2, &[])
            .unwrap();

        assert!(ps[p1].tile(mine).is_flipped);
        assert_eq!(ps[p1].income, income_before + ps[p1].tile(mine).income);
    }

    #[test]
    fn test_era_reset_helpers() {
        let mut b = board(2);
        let p0 = PlayerId::new(0);
        b.edge_mut(EdgeId::new(0)).link = Some(Link { owner: p0, kind: LinkKind::Canal });

        let post = b
            .posts()
            .find(|(_, p)| p.active && p.beer > 0)
            .map(|(id, _)| id)
            .unwrap();
        let before = b.post(post).beer;
        b.post_mut(post).beer = 0;

        b.clear_links();
        b.reset_merchant_beer();

        assert!(b.edges().all(|(_, e)| !e.is_built()));
        assert_eq!(b.post(post).beer, before);
    }
}
