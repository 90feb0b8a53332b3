//! The action executor.
//!
//! [`Game::execute`] is the one mutating entry point drivers use. It vets
//! the action against a throwaway clone first, so the live state is only
//! touched once the whole action (including every consumption step of a
//! compound one) is known to go through.

use crate::actions::{Action, ActionRecord};
use crate::board::{Link, LinkKind, Node, Placed};
use crate::buildings::BuildingKind;
use crate::consts::{
    CANAL_COST, LOAN_AMOUNT, LOAN_INCOME_LEVELS, ONE_RAIL_COAL, ONE_RAIL_COST, TWO_RAIL_BEER,
    TWO_RAIL_COST,
};
use crate::core::ids::{BuildingId, CardId, EdgeId, LocationId};
use crate::game::Game;
use crate::rules::{ActionError, RuleViolation};

impl Game {
    /// Execute `action` for the active player, record it, and pass the
    /// turn. Illegal actions leave the game untouched.
    pub fn execute(&mut self, action: Action) -> Result<(), ActionError> {
        let mut probe = self.clone();
        probe.apply(&action)?;
        // The probe succeeded, so this cannot fail.
        self.apply(&action)?;

        let player = self.active_player();
        log::debug!("{player}: {action}");
        self.record(ActionRecord {
            player,
            sequence: self.sequence(),
            action,
        });
        Ok(())
    }

    /// Apply `action` step by step. On `Err` the state may be partially
    /// updated; callers either probe a clone or forward a vetted action.
    pub(crate) fn apply(&mut self, action: &Action) -> Result<(), ActionError> {
        match *action {
            Action::Build { building, location } => self.apply_build(building, location),
            Action::BuildCanal { edge } => self.apply_canal(edge),
            Action::BuildRail { edge } => self.apply_rail(edge),
            Action::BuildTwoRails { first, second } => self.apply_two_rails(first, second),
            Action::Develop { first, second } => self.apply_develop(first, second),
            Action::Sell { ref buildings } => self.apply_sell(buildings),
            Action::Loan => self.apply_loan(),
            Action::Scout { discard } => self.apply_scout(discard),
            Action::Pass => Ok(()),
        }
    }

    fn apply_build(&mut self, building: BuildingId, location: LocationId) -> Result<(), ActionError> {
        self.ensure_build(building, location)?;
        let player = self.active_player();

        let tile = self.players[player].tile(building);
        let (kind, cost, coal, iron) = (tile.kind, tile.cost, tile.coal_cost, tile.iron_cost);
        let town = self.board.location(location).town;
        let site = Node::Town(town);

        self.players[player].charge(cost)?;
        self.board
            .consume_coal(&mut self.players, player, site, u32::from(coal), &[])?;
        self.board.consume_iron(&mut self.players, player, u32::from(iron))?;

        self.players[player].tile_mut(building).place(location);
        self.board.location_mut(location).occupant = Some(Placed { owner: player, building });

        // Fresh stock moves straight onto the market where the rules allow:
        // iron always, coal only with a market connection.
        let sell_stock = match kind {
            BuildingKind::Iron => true,
            BuildingKind::Coal => self.board.market_linked(site, &[]),
            _ => false,
        };
        if sell_stock {
            let stock = u32::from(self.players[player].tile(building).resources);
            let market = match kind {
                BuildingKind::Iron => &mut self.board.iron_market,
                _ => &mut self.board.coal_market,
            };
            let (absorbed, payout) = market.accept(stock);
            if absorbed > 0 {
                let tile = self.players[player].tile_mut(building);
                tile.resources -= absorbed as u8;
                let flipped = tile.resources == 0;
                if flipped {
                    tile.flip();
                    let income = tile.income;
                    self.players[player].income += income;
                }
                self.players[player].money += payout;
            }
        }
        Ok(())
    }

    fn apply_canal(&mut self, edge: EdgeId) -> Result<(), ActionError> {
        self.ensure_canal(edge)?;
        let player = self.active_player();
        self.players[player].charge(CANAL_COST)?;
        self.players[player].link_tokens -= 1;
        self.board.edge_mut(edge).link = Some(Link { owner: player, kind: LinkKind::Canal });
        Ok(())
    }

    fn apply_rail(&mut self, edge: EdgeId) -> Result<(), ActionError> {
        self.ensure_rail(edge)?;
        let player = self.active_player();
        let site = self.board.edge(edge).nodes[0];

        self.players[player].charge(ONE_RAIL_COST)?;
        self.board
            .consume_coal(&mut self.players, player, site, u32::from(ONE_RAIL_COAL), &[edge])?;
        self.players[player].link_tokens -= 1;
        self.board.edge_mut(edge).link = Some(Link { owner: player, kind: LinkKind::Rail });
        Ok(())
    }

    fn apply_two_rails(&mut self, first: EdgeId, second: EdgeId) -> Result<(), ActionError> {
        self.ensure_two_rails(first, second)?;
        let player = self.active_player();
        let extras = [first, second];

        self.players[player].charge(TWO_RAIL_COST)?;
        // Each rail draws its own coal through the pair-extended network.
        for edge in extras {
            let site = self.board.edge(edge).nodes[0];
            self.board.consume_coal(
                &mut self.players,
                player,
                site,
                u32::from(ONE_RAIL_COAL),
                &extras,
            )?;
        }
        let first_site = self.board.edge(first).nodes[0];
        let beer_site = if self.board.beer_available(
            &self.players,
            player,
            first_site,
            u32::from(TWO_RAIL_BEER),
            false,
            &extras,
        ) {
            first_site
        } else {
            self.board.edge(second).nodes[0]
        };
        self.board.consume_beer(
            &mut self.players,
            player,
            beer_site,
            u32::from(TWO_RAIL_BEER),
            false,
            &extras,
        )?;
        self.players[player].link_tokens -= 2;
        for edge in extras {
            self.board.edge_mut(edge).link = Some(Link { owner: player, kind: LinkKind::Rail });
        }
        Ok(())
    }

    fn apply_develop(&mut self, first: BuildingId, second: BuildingId) -> Result<(), ActionError> {
        self.ensure_develop(first, second)?;
        let player = self.active_player();
        self.players[player].tile_mut(first).retire();
        self.players[player].tile_mut(second).retire();
        Ok(())
    }

    fn apply_sell(&mut self, buildings: &[BuildingId]) -> Result<(), ActionError> {
        if buildings.is_empty() {
            return Err(RuleViolation::EmptySale.into());
        }
        let player = self.active_player();
        for &building in buildings {
            self.ensure_sale_item(building)?;
            let tile = self.players[player].tile(building);
            let beer = tile.beer_cost;
            let town = self
                .board
                .location(tile.location.ok_or(RuleViolation::TileNotActive)?)
                .town;

            // The beer may come from breweries or any connected post.
            self.board.consume_beer(
                &mut self.players,
                player,
                Node::Town(town),
                u32::from(beer),
                true,
                &[],
            )?;

            let tile = self.players[player].tile_mut(building);
            tile.flip();
            let income = tile.income;
            self.players[player].income += income;
        }
        Ok(())
    }

    fn apply_loan(&mut self) -> Result<(), ActionError> {
        self.ensure_loan()?;
        let player = self.active_player();
        self.players[player].money += LOAN_AMOUNT;
        self.players[player].decrease_income_level(LOAN_INCOME_LEVELS);
        Ok(())
    }

    fn apply_scout(&mut self, discard: CardId) -> Result<(), ActionError> {
        self.ensure_scout(discard)?;
        let player = self.active_player();
        let card = self.players[player]
            .take_card(discard)
            .ok_or(RuleViolation::CardNotInHand(discard))?;
        self.deck.discard(card);
        let (location, industry) = self.deck.mint_wilds();
        self.players[player].add_card(location);
        self.players[player].add_card(industry);
        Ok(())
    }
}
