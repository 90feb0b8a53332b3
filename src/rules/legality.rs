//! Per-action legality predicates.
//!
//! Each `ensure_*` function validates one action kind against the live
//! state and reports the first violated rule. They are pure reads; the
//! executor runs them before touching anything, and [`Game::check`] wraps
//! the whole pipeline (preconditions plus resource consumption) against a
//! throwaway clone so that multi-step actions are vetted end to end
//! without ever rolling back the real state.

use crate::actions::Action;
use crate::board::{Era, Node, ResourceKind};
use crate::consts::{
    CANAL_COST, LOAN_MIN_LEVEL, ONE_RAIL_COAL, ONE_RAIL_COST, TWO_RAIL_BEER, TWO_RAIL_COST,
};
use crate::core::ids::{BuildingId, CardId, EdgeId, LocationId};
use crate::game::Game;
use crate::rules::{ActionError, InsufficientFunds, RuleViolation};

impl Game {
    /// Check `action` for the active player without mutating this game.
    ///
    /// Runs the full executor against a clone, so the verdict accounts for
    /// every step of compound actions (multi-tile sales, double rails).
    pub fn check(&self, action: &Action) -> Result<(), ActionError> {
        let mut probe = self.clone();
        probe.apply(action)
    }

    /// Whether `action` is legal for the active player.
    #[must_use]
    pub fn is_legal(&self, action: &Action) -> bool {
        self.check(action).is_ok()
    }

    fn ensure_funds(&self, needed: i64) -> Result<(), RuleViolation> {
        let available = self.players[self.active_player()].money;
        if available < needed {
            return Err(InsufficientFunds { needed, available }.into());
        }
        Ok(())
    }

    pub(crate) fn ensure_build(
        &self,
        building: BuildingId,
        location: LocationId,
    ) -> Result<(), RuleViolation> {
        let player = self.active_player();
        let state = &self.players[player];
        if building.index() >= state.tile_count() {
            return Err(RuleViolation::TileUnavailable);
        }
        let tile = state.tile(building);
        if tile.is_active || tile.is_retired {
            return Err(RuleViolation::TileUnavailable);
        }
        // Only the lowest remaining tier of each industry may be built.
        if state.lowest_unplaced(tile.kind) != Some(building) {
            return Err(RuleViolation::TileUnavailable);
        }
        match self.board.era {
            Era::Canal if tile.rail_only => return Err(RuleViolation::WrongEra),
            Era::Rail if tile.canal_only => return Err(RuleViolation::WrongEra),
            _ => {}
        }

        if location.index() >= self.board.locations().count() {
            return Err(RuleViolation::TileUnavailable);
        }
        let loc = self.board.location(location);
        if loc.occupant.is_some() {
            return Err(RuleViolation::LocationOccupied(location));
        }
        if !loc.allowed.contains(&tile.kind) {
            return Err(RuleViolation::KindNotAllowed);
        }
        if self.board.era == Era::Canal {
            let crowded = self
                .board
                .town(loc.town)
                .locations()
                .iter()
                .any(|&l| matches!(self.board.location(l).occupant, Some(p) if p.owner == player));
            if crowded {
                return Err(RuleViolation::OneTilePerTown);
            }
        }

        let site = Node::Town(loc.town);
        let coal = self
            .board
            .coal_cost(&self.players, site, u32::from(tile.coal_cost), &[])
            .ok_or(RuleViolation::ResourceUnreachable(ResourceKind::Coal))?;
        let iron = self.board.iron_cost(&self.players, u32::from(tile.iron_cost));
        self.ensure_funds(tile.cost + coal + iron)
    }

    fn ensure_link_site(&self, edge: EdgeId, wanted: Era) -> Result<(), RuleViolation> {
        if self.board.era != wanted {
            return Err(RuleViolation::WrongEra);
        }
        let e = self.board.edge(edge);
        if e.is_built() {
            return Err(RuleViolation::EdgeAlreadyBuilt(edge));
        }
        if !e.buildable_in(wanted) {
            return Err(match wanted {
                Era::Canal => RuleViolation::EdgeNotCanal(edge),
                Era::Rail => RuleViolation::EdgeNotRail(edge),
            });
        }
        Ok(())
    }

    pub(crate) fn ensure_canal(&self, edge: EdgeId) -> Result<(), RuleViolation> {
        let player = self.active_player();
        self.ensure_link_site(edge, Era::Canal)?;
        if self.players[player].link_tokens == 0 {
            return Err(RuleViolation::NoLinkTokens);
        }
        self.ensure_funds(CANAL_COST)
    }

    pub(crate) fn ensure_rail(&self, edge: EdgeId) -> Result<(), RuleViolation> {
        let player = self.active_player();
        self.ensure_link_site(edge, Era::Rail)?;
        if self.players[player].link_tokens == 0 {
            return Err(RuleViolation::NoLinkTokens);
        }
        // The rail under construction counts as built for its own coal.
        let site = self.board.edge(edge).nodes[0];
        let coal = self
            .board
            .coal_cost(&self.players, site, u32::from(ONE_RAIL_COAL), &[edge])
            .ok_or(RuleViolation::ResourceUnreachable(ResourceKind::Coal))?;
        self.ensure_funds(ONE_RAIL_COST + coal)
    }

    pub(crate) fn ensure_two_rails(
        &self,
        first: EdgeId,
        second: EdgeId,
    ) -> Result<(), RuleViolation> {
        let player = self.active_player();
        if first == second {
            return Err(RuleViolation::SameEdge);
        }
        self.ensure_link_site(first, Era::Rail)?;
        self.ensure_link_site(second, Era::Rail)?;
        if self.players[player].link_tokens < 2 {
            return Err(RuleViolation::NoLinkTokens);
        }

        // Each rail sources its own coal through the network extended by
        // both; the beer may sit on either side.
        let extras = [first, second];
        let mut coal = 0;
        for edge in extras {
            let site = self.board.edge(edge).nodes[0];
            coal += self
                .board
                .coal_cost(&self.players, site, u32::from(ONE_RAIL_COAL), &extras)
                .ok_or(RuleViolation::ResourceUnreachable(ResourceKind::Coal))?;
        }
        let beer_near = |edge: EdgeId| {
            self.board.beer_available(
                &self.players,
                player,
                self.board.edge(edge).nodes[0],
                u32::from(TWO_RAIL_BEER),
                false,
                &extras,
            )
        };
        if !beer_near(first) && !beer_near(second) {
            return Err(RuleViolation::ResourceUnreachable(ResourceKind::Beer));
        }
        self.ensure_funds(TWO_RAIL_COST + coal)
    }

    pub(crate) fn ensure_develop(
        &self,
        first: BuildingId,
        second: BuildingId,
    ) -> Result<(), RuleViolation> {
        let player = self.active_player();
        let state = &self.players[player];
        if first == second {
            return Err(RuleViolation::SameTile);
        }
        for id in [first, second] {
            if id.index() >= state.tile_count() {
                return Err(RuleViolation::TileUnavailable);
            }
            let tile = state.tile(id);
            if tile.is_active || tile.is_retired {
                return Err(RuleViolation::TileUnavailable);
            }
            if !tile.developable {
                return Err(RuleViolation::NotDevelopable);
            }
        }
        // Development removes tiles bottom-up, like building does.
        if state.lowest_unplaced(state.tile(first).kind) != Some(first) {
            return Err(RuleViolation::TileUnavailable);
        }
        let second_kind = state.tile(second).kind;
        let next_lowest = state
            .tiles()
            .filter(|(id, b)| {
                b.kind == second_kind && !b.is_active && !b.is_retired && *id != first
            })
            .min_by_key(|(id, b)| (b.tier, *id))
            .map(|(id, _)| id);
        if next_lowest != Some(second) {
            return Err(RuleViolation::TileUnavailable);
        }
        Ok(())
    }

    pub(crate) fn ensure_sale_item(&self, building: BuildingId) -> Result<(), RuleViolation> {
        let player = self.active_player();
        let state = &self.players[player];
        if building.index() >= state.tile_count() {
            return Err(RuleViolation::TileNotActive);
        }
        let tile = state.tile(building);
        if !tile.is_active || tile.location.is_none() {
            return Err(RuleViolation::TileNotActive);
        }
        if tile.is_flipped {
            return Err(RuleViolation::AlreadyFlipped);
        }
        if !tile.kind.is_market() {
            return Err(RuleViolation::NotAMarketTile);
        }
        Ok(())
    }

    pub(crate) fn ensure_loan(&self) -> Result<(), RuleViolation> {
        if self.players[self.active_player()].income_level() < LOAN_MIN_LEVEL {
            return Err(RuleViolation::IncomeTooLow);
        }
        Ok(())
    }

    pub(crate) fn ensure_scout(&self, discard: CardId) -> Result<(), RuleViolation> {
        let state = &self.players[self.active_player()];
        if state.holds_wild() {
            return Err(RuleViolation::AlreadyHoldsWild);
        }
        if !state.hand().iter().any(|c| c.id == discard) {
            return Err(RuleViolation::CardNotInHand(discard));
        }
        Ok(())
    }
}
