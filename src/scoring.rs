//! Era scoring and the canal-to-rail transition.
//!
//! An era ends when the deck is exhausted and every hand is empty. Both
//! eras score the same way: each built link earns its owner the link
//! values of its two endpoints, then each flipped tile earns its printed
//! victory points. The canal-era transition additionally strips the board
//! back for rail play.

use crate::board::{Era, Node, Placed};
use crate::consts::STARTING_LINK_TOKENS;
use crate::core::ids::{LocationId, TownId};
use crate::core::player::{PlayerId, PlayerMap};
use crate::game::Game;
use crate::rules::EraError;

impl Game {
    /// Link value of a town: the link points of every tile standing there.
    fn town_link_value(&self, town: TownId) -> i32 {
        self.board
            .town(town)
            .locations()
            .iter()
            .filter_map(|&l| self.board.location(l).occupant)
            .map(|p| self.players[p.owner].tile(p.building).link_points)
            .sum()
    }

    fn node_link_value(&self, node: Node) -> i32 {
        match node {
            Node::Town(t) => self.town_link_value(t),
            Node::TradePost(p) => {
                let post = self.board.post(p);
                if post.active {
                    post.network_points
                } else {
                    0
                }
            }
        }
    }

    /// The live victory-point tally: committed points plus what the
    /// standing board is currently worth — each built link earns its
    /// owner the link values of both endpoints, each flipped tile its
    /// printed points. Read-only; the same totals are committed at the
    /// era transitions.
    #[must_use]
    pub fn victory_points(&self) -> PlayerMap<i32> {
        let mut totals =
            PlayerMap::new(self.players.player_count(), |p| self.players[p].victory_points);
        for (_, edge) in self.board.edges() {
            if let Some(link) = edge.link {
                let vp: i32 = edge.nodes.iter().map(|&n| self.node_link_value(n)).sum();
                totals[link.owner] += vp;
            }
        }
        for (player, state) in self.players.iter() {
            let vp: i32 = state
                .tiles()
                .filter(|(_, b)| b.is_flipped && !b.is_retired)
                .map(|(_, b)| b.victory_points)
                .sum();
            totals[player] += vp;
        }
        totals
    }

    /// Commit link and tile points for the current board.
    fn score_era(&mut self) {
        let totals = self.victory_points();
        for player in self.players.player_ids().collect::<Vec<_>>() {
            self.players[player].victory_points = totals[player];
        }
    }

    fn ensure_era_done(&self) -> Result<(), EraError> {
        if !self.deck.is_exhausted() {
            return Err(EraError::DeckNotExhausted(self.deck.remaining()));
        }
        for (player, state) in self.players.iter() {
            if !state.hand().is_empty() {
                return Err(EraError::HandsNotEmpty(player));
            }
        }
        Ok(())
    }

    /// Score the canal era and reset the board for the rail era.
    ///
    /// Canals come off the board, tier-1 tiles are retired as obsolete,
    /// link tokens are restored, merchant beer is restocked, and fresh
    /// hands are dealt from the reshuffled discards. Cash carries over.
    pub fn end_canal_era(&mut self) -> Result<(), EraError> {
        if self.board.era != Era::Canal {
            return Err(EraError::AlreadyRailEra);
        }
        self.ensure_era_done()?;
        log::info!("canal era over after {} actions", self.sequence());
        self.score_era();

        let obsolete: Vec<(LocationId, Placed)> = self
            .board
            .locations()
            .filter_map(|(id, l)| l.occupant.map(|p| (id, p)))
            .filter(|(_, p)| self.players[p.owner].tile(p.building).tier == 1)
            .collect();
        for (location, placed) in obsolete {
            self.players[placed.owner].tile_mut(placed.building).retire();
            self.board.location_mut(location).occupant = None;
        }

        self.board.clear_links();
        self.board.reset_merchant_beer();
        for player in self.players.player_ids().collect::<Vec<_>>() {
            self.players[player].link_tokens = STARTING_LINK_TOKENS;
        }

        self.board.era = Era::Rail;
        let mut rng = self.rng_mut().fork();
        self.deck.reform(Vec::new(), &mut rng);
        self.deal_hands();
        Ok(())
    }

    /// Score the rail era and name the winner: most victory points, cash
    /// as the tiebreaker.
    pub fn end_rail_era(&mut self) -> Result<PlayerId, EraError> {
        if self.board.era != Era::Rail {
            return Err(EraError::NotRailEra);
        }
        self.ensure_era_done()?;
        self.score_era();

        let winner = self
            .players
            .iter()
            .max_by_key(|(_, p)| (p.victory_points, p.money))
            .map(|(id, _)| id)
            .unwrap_or(PlayerId::new(0));
        log::info!("game over, {winner} wins");
        Ok(winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Link, LinkKind};
    use crate::buildings::BuildingKind;
    use crate::core::ids::{EdgeId, TownId};

    /// Drain the deck and hands into the discard pile.
    fn exhaust(game: &mut Game) {
        for player in game.players.player_ids().collect::<Vec<_>>() {
            let held: Vec<_> = game.players[player].hand().iter().map(|c| c.id).collect();
            for id in held {
                game.discard_card(player, id).unwrap();
            }
        }
        while let Some(card) = game.deck.draw() {
            game.deck.discard(card);
        }
    }

    fn place(game: &mut Game, player: PlayerId, kind: BuildingKind, town: u16, slot: usize) {
        let building = game.players[player].lowest_unplaced(kind).unwrap();
        let location = game.board.town(TownId::new(town)).locations()[slot];
        game.players[player].tile_mut(building).place(location);
        game.board.location_mut(location).occupant = Some(Placed { owner: player, building });
    }

    #[test]
    fn test_era_end_preconditions() {
        let mut game = Game::new(2, 21);
        assert!(matches!(game.end_canal_era(), Err(EraError::DeckNotExhausted(24))));
        assert!(matches!(game.end_rail_era(), Err(EraError::NotRailEra)));

        while game.deck.draw().is_some() {}
        assert!(matches!(game.end_canal_era(), Err(EraError::HandsNotEmpty(_))));
    }

    #[test]
    fn test_canal_era_transition() {
        let mut game = Game::new(2, 21);
        let p0 = PlayerId::new(0);

        // A placed tier-1 mine and a canal to score and then strip.
        place(&mut game, p0, BuildingKind::Coal, 7, 0);
        game.board.edge_mut(EdgeId::new(0)).link =
            Some(Link { owner: p0, kind: LinkKind::Canal });
        game.players[p0].link_tokens -= 1;
        game.players[p0].money = 2;

        exhaust(&mut game);
        game.end_canal_era().unwrap();

        assert_eq!(game.board.era, Era::Rail);
        assert!(game.board.edges().all(|(_, e)| !e.is_built()));
        // The obsolete tier-1 mine is gone and its slot is free again.
        let mine = game.players[p0]
            .tiles()
            .find(|(_, b)| b.kind == BuildingKind::Coal && b.tier == 1)
            .map(|(id, _)| id)
            .unwrap();
        assert!(game.players[p0].tile(mine).is_retired);
        let slot = game.board.town(TownId::new(7)).locations()[0];
        assert!(game.board.location(slot).occupant.is_none());

        // Cash carries across the transition; only the link tokens reset.
        assert_eq!(game.players[p0].money, 2);
        assert_eq!(game.players[p0].link_tokens, 14);
        for (_, player) in game.players.iter() {
            assert_eq!(player.hand().len(), 8);
        }
        assert_eq!(game.deck.remaining(), 24);

        assert!(matches!(game.end_canal_era(), Err(EraError::AlreadyRailEra)));
    }

    #[test]
    fn test_link_scoring_counts_both_endpoints() {
        let mut game = Game::new(2, 21);
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        // P1's brewery in Cannock (2 link points); P0 owns the link from
        // Cannock to Walsall. Towns without tiles are worth nothing.
        place(&mut game, p1, BuildingKind::Beer, 7, 0);
        let edge = game
            .board
            .edges()
            .find(|(_, e)| {
                e.touches(Node::Town(TownId::new(7))) && e.touches(Node::Town(TownId::new(8)))
            })
            .map(|(id, _)| id)
            .unwrap();
        game.board.edge_mut(edge).link = Some(Link { owner: p0, kind: LinkKind::Canal });

        exhaust(&mut game);
        game.end_canal_era().unwrap();

        assert_eq!(game.players[p0].victory_points, 2);
        // P1's brewery is unflipped: no tile points yet.
        assert_eq!(game.players[p1].victory_points, 0);
    }

    #[test]
    fn test_flipped_tiles_score_their_points() {
        let mut game = Game::new(2, 21);
        let p0 = PlayerId::new(0);

        place(&mut game, p0, BuildingKind::Cotton, 15, 0);
        let mill = game.players[p0]
            .tiles()
            .find(|(_, b)| b.is_active)
            .map(|(id, _)| id)
            .unwrap();
        game.players[p0].tile_mut(mill).flip();
        let expected = game.players[p0].tile(mill).victory_points;

        exhaust(&mut game);
        game.end_canal_era().unwrap();

        assert_eq!(game.players[p0].victory_points, expected);
    }

    #[test]
    fn test_victory_points_reads_the_standing_board() {
        let mut game = Game::new(2, 21);
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        // P1's brewery in Cannock (2 link points), flipped; P0 owns the
        // Cannock-Walsall link.
        place(&mut game, p1, BuildingKind::Beer, 7, 0);
        let brewery = game.players[p1]
            .tiles()
            .find(|(_, b)| b.is_active)
            .map(|(id, _)| id)
            .unwrap();
        game.players[p1].tile_mut(brewery).flip();
        let brewery_vp = game.players[p1].tile(brewery).victory_points;
        let edge = game
            .board
            .edges()
            .find(|(_, e)| {
                e.touches(Node::Town(TownId::new(7))) && e.touches(Node::Town(TownId::new(8)))
            })
            .map(|(id, _)| id)
            .unwrap();
        game.board.edge_mut(edge).link = Some(Link { owner: p0, kind: LinkKind::Canal });

        let totals = game.victory_points();
        assert_eq!(totals[p0], 2);
        assert_eq!(totals[p1], brewery_vp);
        // A read-only query: nothing has been committed.
        assert_eq!(game.players[p0].victory_points, 0);
        assert_eq!(game.players[p1].victory_points, 0);
    }

    #[test]
    fn test_rail_era_winner_tiebreak_on_money() {
        let mut game = Game::new(2, 21);
        exhaust(&mut game);
        game.end_canal_era().unwrap();

        exhaust(&mut game);
        let p1 = PlayerId::new(1);
        game.players[p1].money += 5;
        let winner = game.end_rail_era().unwrap();
        assert_eq!(winner, p1);
    }
}
