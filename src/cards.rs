//! Action cards and the draw deck.
//!
//! Every turn action is paid for with a card. Location cards name a town;
//! industry cards name a class of tile; the two wild cards (gained by
//! scouting) stand in for any location or any industry. The deck
//! composition scales with the player count so that the card supply, not a
//! round counter, determines era length.

use serde::{Deserialize, Serialize};

use crate::buildings::BuildingKind;
use crate::core::ids::{CardId, TownId};
use crate::core::rng::GameRng;

/// Industry class named on an industry card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndustryCardKind {
    Iron,
    Coal,
    Brewery,
    Pottery,
    /// Either a goods factory or a cotton mill.
    GoodsOrCotton,
}

impl IndustryCardKind {
    /// Whether a tile of `kind` may be built with this card.
    #[must_use]
    pub fn permits(self, kind: BuildingKind) -> bool {
        match self {
            IndustryCardKind::Iron => kind == BuildingKind::Iron,
            IndustryCardKind::Coal => kind == BuildingKind::Coal,
            IndustryCardKind::Brewery => kind == BuildingKind::Beer,
            IndustryCardKind::Pottery => kind == BuildingKind::Pottery,
            IndustryCardKind::GoodsOrCotton => {
                kind == BuildingKind::Goods || kind == BuildingKind::Cotton
            }
        }
    }
}

/// What a card authorizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Build in the named town.
    Location(TownId),
    /// Build a tile of the named class anywhere in the player's network.
    Industry(IndustryCardKind),
    /// Scouted: build in any town.
    WildLocation,
    /// Scouted: build any tile class.
    WildIndustry,
}

impl CardKind {
    #[must_use]
    pub fn is_wild(self) -> bool {
        matches!(self, CardKind::WildLocation | CardKind::WildIndustry)
    }
}

/// A single action card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
}

impl Card {
    #[must_use]
    pub const fn new(id: CardId, kind: CardKind) -> Self {
        Self { id, kind }
    }
}

/// Location-card copies per town, indexed by `TownId`, for 2/3/4 players.
/// Farm breweries have no location cards.
#[rustfmt::skip]
const LOCATION_COUNTS: [[u8; 20]; 3] = [
    [1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 1, 1],
    [2, 2, 2, 1, 1, 2, 1, 2, 1, 2, 1, 2, 2, 1, 1, 1, 1, 3, 2, 1],
    [2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 3, 2, 2],
];

/// Industry-card copies for 2/3/4 players, in [`INDUSTRY_KINDS`] order.
const INDUSTRY_COUNTS: [[u8; 5]; 3] = [
    [4, 2, 5, 2, 8],
    [4, 2, 5, 2, 10],
    [4, 3, 5, 3, 12],
];

const INDUSTRY_KINDS: [IndustryCardKind; 5] = [
    IndustryCardKind::Iron,
    IndustryCardKind::Coal,
    IndustryCardKind::Brewery,
    IndustryCardKind::Pottery,
    IndustryCardKind::GoodsOrCotton,
];

/// The draw deck plus the discard pile.
///
/// Cards spent on actions go to the discard pile; at the era transition the
/// discards (and any cleared hands) are folded back in and reshuffled.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Deck {
    draw: Vec<Card>,
    discard: Vec<Card>,
    next_id: u32,
}

impl Deck {
    /// Build the unshuffled deck for `player_count` players (2-4).
    #[must_use]
    pub fn standard(player_count: usize) -> Self {
        assert!((2..=4).contains(&player_count), "2-4 players supported");
        let table = player_count - 2;

        let mut draw = Vec::new();
        let mut next_id = 0u32;
        let mut mint = |kind: CardKind, copies: u8, draw: &mut Vec<Card>| {
            for _ in 0..copies {
                draw.push(Card::new(CardId::new(next_id), kind));
                next_id += 1;
            }
        };

        for (town, &copies) in LOCATION_COUNTS[table].iter().enumerate() {
            mint(CardKind::Location(TownId::new(town as u16)), copies, &mut draw);
        }
        for (i, &kind) in INDUSTRY_KINDS.iter().enumerate() {
            mint(CardKind::Industry(kind), INDUSTRY_COUNTS[table][i], &mut draw);
        }

        Self {
            draw,
            discard: Vec::new(),
            next_id,
        }
    }

    /// Shuffle the draw pile.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.draw);
    }

    /// Draw the top card, if any remain.
    pub fn draw(&mut self) -> Option<Card> {
        self.draw.pop()
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draw.len()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.draw.is_empty()
    }

    /// Add a spent card to the discard pile. Wild cards leave play instead.
    pub fn discard(&mut self, card: Card) {
        if !card.kind.is_wild() {
            self.discard.push(card);
        }
    }

    /// Mint a fresh (wild location, wild industry) pair for a scout.
    pub fn mint_wilds(&mut self) -> (Card, Card) {
        let location = Card::new(CardId::new(self.next_id), CardKind::WildLocation);
        let industry = Card::new(CardId::new(self.next_id + 1), CardKind::WildIndustry);
        self.next_id += 2;
        (location, industry)
    }

    /// Fold the discard pile and `extra` cards back into the draw pile and
    /// reshuffle (era transition). Wild cards in `extra` leave play.
    pub fn reform(&mut self, extra: Vec<Card>, rng: &mut GameRng) {
        self.draw.append(&mut self.discard);
        self.draw.extend(extra.into_iter().filter(|c| !c.kind.is_wild()));
        self.shuffle(rng);
    }
}
