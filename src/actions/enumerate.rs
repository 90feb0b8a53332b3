//! Legal-action enumeration for the active player.
//!
//! Candidates are generated by a cheap structural sweep and then vetted
//! with [`Game::check`], so everything returned here is guaranteed to
//! execute. Search drivers treat this as the complete move list for the
//! current state.

use smallvec::SmallVec;

use crate::actions::Action;
use crate::board::Era;
use crate::buildings::BuildingKind;
use crate::core::ids::{BuildingId, EdgeId};
use crate::game::Game;

impl Game {
    /// Every action the active player may take, `Pass` included.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        let mut found = Vec::new();
        self.push_builds(&mut found);
        self.push_links(&mut found);
        self.push_develops(&mut found);
        self.push_sales(&mut found);
        if self.is_legal(&Action::Loan) {
            found.push(Action::Loan);
        }
        self.push_scouts(&mut found);
        found.push(Action::Pass);
        found
    }

    fn push_builds(&self, found: &mut Vec<Action>) {
        let player = self.active_player();
        for (location, _) in self.board.locations() {
            for kind in BuildingKind::ALL {
                let Some(building) = self.players[player].lowest_unplaced(kind) else {
                    continue;
                };
                let action = Action::Build { building, location };
                if self.is_legal(&action) {
                    found.push(action);
                }
            }
        }
    }

    fn push_links(&self, found: &mut Vec<Action>) {
        let candidates: Vec<EdgeId> = self
            .board
            .edges()
            .filter(|(_, e)| !e.is_built() && e.buildable_in(self.board.era))
            .map(|(id, _)| id)
            .collect();

        match self.board.era {
            Era::Canal => {
                for &edge in &candidates {
                    let action = Action::BuildCanal { edge };
                    if self.is_legal(&action) {
                        found.push(action);
                    }
                }
            }
            Era::Rail => {
                for &edge in &candidates {
                    let action = Action::BuildRail { edge };
                    if self.is_legal(&action) {
                        found.push(action);
                    }
                }
                // Unordered pairs: resource sourcing is symmetric in the
                // two rails, so (a, b) covers (b, a).
                for (i, &first) in candidates.iter().enumerate() {
                    for &second in &candidates[i + 1..] {
                        let action = Action::BuildTwoRails { first, second };
                        if self.is_legal(&action) {
                            found.push(action);
                        }
                    }
                }
            }
        }
    }

    fn push_develops(&self, found: &mut Vec<Action>) {
        let player = self.active_player();
        let state = &self.players[player];
        for first_kind in BuildingKind::ALL {
            let Some(first) = state.lowest_unplaced(first_kind) else {
                continue;
            };
            for second_kind in BuildingKind::ALL {
                let second = state
                    .tiles()
                    .filter(|(id, b)| {
                        b.kind == second_kind && !b.is_active && !b.is_retired && *id != first
                    })
                    .min_by_key(|(id, b)| (b.tier, *id))
                    .map(|(id, _)| id);
                let Some(second) = second else { continue };
                let action = Action::Develop { first, second };
                if self.is_legal(&action) {
                    found.push(action);
                }
            }
        }
    }

    fn push_sales(&self, found: &mut Vec<Action>) {
        let player = self.active_player();
        let sellable: Vec<BuildingId> = self.players[player]
            .tiles()
            .filter(|(_, b)| b.is_active && !b.is_flipped && b.kind.is_market())
            .map(|(id, _)| id)
            .collect();

        // Every non-empty combination, smallest masks first. A sale is
        // vetted as a whole, so a combination only survives when each of
        // its tiles finds beer in turn.
        for mask in 1u64..(1u64 << sellable.len()) {
            let buildings: SmallVec<[BuildingId; 4]> = sellable
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, &id)| id)
                .collect();
            let action = Action::Sell { buildings };
            if self.is_legal(&action) {
                found.push(action);
            }
        }
    }

    fn push_scouts(&self, found: &mut Vec<Action>) {
        let state = &self.players[self.active_player()];
        if state.holds_wild() {
            return;
        }
        for card in state.hand() {
            let action = Action::Scout { discard: card.id };
            if self.is_legal(&action) {
                found.push(action);
            }
        }
    }
}
