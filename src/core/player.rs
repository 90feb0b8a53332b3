//! Player identification and per-player game state.
//!
//! ## PlayerId
//!
//! Type-safe player identifier; the engine supports 2-4 seats.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access, indexable by
//! `PlayerId`.
//!
//! ## PlayerState
//!
//! Everything a single player exclusively owns: money, the income track
//! position, victory points, link tokens, the 44-tile industry roster, and
//! the current hand of cards. The board only ever holds back-references
//! (`PlayerId` + `BuildingId`) into the roster.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::buildings::{Building, BuildingKind};
use crate::cards::Card;
use crate::consts::{STARTING_INCOME, STARTING_LINK_TOKENS, STARTING_MONEY};
use crate::core::ids::{BuildingId, CardId};
use crate::rules::InsufficientFunds;

/// Player identifier. Player indices are 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// One player's exclusively-owned state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerState {
    /// Cash on hand. Never negative; all spending goes through [`charge`].
    ///
    /// [`charge`]: PlayerState::charge
    pub money: i64,
    /// Income track position (not the income level; see [`income_level`]).
    ///
    /// [`income_level`]: PlayerState::income_level
    pub income: i32,
    /// Committed victory points (updated at era scoring).
    pub victory_points: i32,
    /// Remaining canal/rail link tokens.
    pub link_tokens: u8,
    /// The full tile roster, placed and unplaced. Indexed by `BuildingId`.
    buildings: Vec<Building>,
    /// Current hand of cards, in draw order.
    hand: Vec<Card>,
}

impl PlayerState {
    /// Create a player with the starting roster and no cards dealt yet.
    #[must_use]
    pub fn new(buildings: Vec<Building>) -> Self {
        Self {
            money: STARTING_MONEY,
            income: STARTING_INCOME,
            victory_points: 0,
            link_tokens: STARTING_LINK_TOKENS,
            buildings,
            hand: Vec::new(),
        }
    }

    // === Money ===

    /// Deduct `amount` from the player's cash.
    ///
    /// The non-negative-money invariant is enforced here: an unaffordable
    /// charge is an error and leaves the balance untouched.
    pub fn charge(&mut self, amount: i64) -> Result<(), InsufficientFunds> {
        if self.money < amount {
            return Err(InsufficientFunds {
                needed: amount,
                available: self.money,
            });
        }
        self.money -= amount;
        Ok(())
    }

    // === Income track ===

    /// Income level for the current track position.
    ///
    /// Track positions map onto levels in bands: 1 position per level up to
    /// level 0, then 2, 3 and 4 positions per level, capped at level 30.
    #[must_use]
    pub fn income_level(&self) -> i32 {
        let p = self.income;
        if p <= 10 {
            p - 10
        } else if p <= 30 {
            (p - 10 + 1) / 2
        } else if p <= 60 {
            (p + 2) / 3
        } else if p <= 96 {
            20 + (p - 60 + 3) / 4
        } else {
            30
        }
    }

    /// Drop the income track by `levels` whole levels (loan penalty).
    ///
    /// Each step lands on the top position of the next band down, mirroring
    /// the physical track; the position is floored at 0.
    pub fn decrease_income_level(&mut self, levels: u32) {
        for _ in 0..levels {
            let p = self.income;
            self.income = if p <= 11 {
                p - 1
            } else if p == 12 {
                p - 2
            } else if p <= 32 {
                p - (3 - (p % 2))
            } else if p == 33 {
                p - 4
            } else if p <= 63 {
                p - match p % 3 {
                    1 => 3,
                    2 => 4,
                    _ => 5,
                }
            } else if p == 64 {
                p - 6
            } else if p <= 96 {
                p - match p % 4 {
                    1 => 4,
                    2 => 5,
                    3 => 6,
                    _ => 7,
                }
            } else {
                93
            };
            self.income = self.income.max(0);
        }
    }

    // === Roster ===

    /// Number of tiles in the roster.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.buildings.len()
    }

    /// Get a tile by ID.
    #[must_use]
    pub fn tile(&self, id: BuildingId) -> &Building {
        &self.buildings[id.index()]
    }

    /// Get a mutable tile by ID.
    pub fn tile_mut(&mut self, id: BuildingId) -> &mut Building {
        &mut self.buildings[id.index()]
    }

    /// Iterate over (BuildingId, &Building) pairs.
    pub fn tiles(&self) -> impl Iterator<Item = (BuildingId, &Building)> {
        self.buildings
            .iter()
            .enumerate()
            .map(|(i, b)| (BuildingId::new(i as u16), b))
    }

    /// The lowest-tier tile of `kind` that is still buildable.
    ///
    /// Lower tiers must leave the roster (placed or developed away) before
    /// higher tiers become buildable, so only this tile is ever offered to
    /// the enumerator for `kind`.
    #[must_use]
    pub fn lowest_unplaced(&self, kind: BuildingKind) -> Option<BuildingId> {
        self.tiles()
            .filter(|(_, b)| b.kind == kind && !b.is_active && !b.is_retired)
            .min_by_key(|(id, b)| (b.tier, *id))
            .map(|(id, _)| id)
    }

    // === Hand ===

    /// Current hand, in draw order.
    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Add a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Remove a specific card from the hand, returning it if held.
    pub fn take_card(&mut self, id: CardId) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c.id == id)?;
        Some(self.hand.remove(pos))
    }

    /// Remove every card from the hand (era transition).
    pub fn clear_hand(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.hand)
    }

    /// Whether the hand holds a wild card of either kind.
    #[must_use]
    pub fn holds_wild(&self) -> bool {
        self.hand.iter().any(|c| c.kind.is_wild())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::roster;

    fn player() -> PlayerState {
        PlayerState::new(roster())
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all(3).collect();
        assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    }

    #[test]
    fn test_player_map_indexing() {
        let mut map: PlayerMap<i32> = PlayerMap::with_value(2, 5);
        map[PlayerId::new(1)] = 9;

        assert_eq!(map[PlayerId::new(0)], 5);
        assert_eq!(map[PlayerId::new(1)], 9);
        assert_eq!(map.player_count(), 2);
    }

    #[test]
    fn test_starting_state() {
        let p = player();
        assert_eq!(p.money, 17);
        assert_eq!(p.income, 10);
        assert_eq!(p.link_tokens, 14);
        assert_eq!(p.tile_count(), 44);
        assert!(p.hand().is_empty());
    }

    #[test]
    fn test_charge_enforces_floor() {
        let mut p = player();
        assert!(p.charge(17).is_ok());
        assert_eq!(p.money, 0);

        let err = p.charge(1).unwrap_err();
        assert_eq!(err.needed, 1);
        assert_eq!(err.available, 0);
        assert_eq!(p.money, 0);
    }

    #[test]
    fn test_income_level_bands() {
        let mut p = player();

        p.income = 10;
        assert_eq!(p.income_level(), 0);
        p.income = 3;
        assert_eq!(p.income_level(), -7);
        p.income = 11;
        assert_eq!(p.income_level(), 1);
        p.income = 30;
        assert_eq!(p.income_level(), 10);
        p.income = 33;
        assert_eq!(p.income_level(), 11);
        p.income = 60;
        assert_eq!(p.income_level(), 20);
        p.income = 96;
        assert_eq!(p.income_level(), 29);
        p.income = 99;
        assert_eq!(p.income_level(), 30);
    }

    #[test]
    fn test_decrease_income_level() {
        let mut p = player();

        p.income = 12;
        p.decrease_income_level(1);
        assert_eq!(p.income, 10);

        p.income = 5;
        p.decrease_income_level(3);
        assert_eq!(p.income, 2);

        // Floors at zero
        p.income = 1;
        p.decrease_income_level(4);
        assert_eq!(p.income, 0);
    }

    #[test]
    fn test_lowest_unplaced_tier_order() {
        let mut p = player();
        let first = p.lowest_unplaced(BuildingKind::Coal).unwrap();
        assert_eq!(p.tile(first).tier, 1);

        // Retiring the tier-1 mine exposes tier 2.
        p.tile_mut(first).is_retired = true;
        let next = p.lowest_unplaced(BuildingKind::Coal).unwrap();
        assert_eq!(p.tile(next).tier, 2);
    }

    #[test]
    fn test_hand_take_card() {
        use crate::cards::CardKind;

        let mut p = player();
        p.add_card(Card::new(CardId::new(1), CardKind::WildIndustry));
        assert!(p.holds_wild());

        let taken = p.take_card(CardId::new(1)).unwrap();
        assert_eq!(taken.id, CardId::new(1));
        assert!(p.take_card(CardId::new(1)).is_none());
        assert!(!p.holds_wild());
    }
}
