//! The top-level game state and lifecycle.

use im::Vector;

use crate::actions::ActionRecord;
use crate::board::Board;
use crate::buildings::roster;
use crate::cards::Deck;
use crate::consts::STARTING_HAND_SIZE;
use crate::core::ids::CardId;
use crate::core::player::{PlayerId, PlayerMap, PlayerState};
use crate::core::rng::GameRng;
use crate::rules::RuleViolation;

/// A complete game in progress.
///
/// The action history lives in a persistent vector, so forked copies share
/// structure instead of duplicating the whole log.
#[derive(Clone, Debug)]
pub struct Game {
    pub board: Board,
    pub players: PlayerMap<PlayerState>,
    pub deck: Deck,
    active: PlayerId,
    sequence: u32,
    history: Vector<ActionRecord>,
    rng: GameRng,
}

impl Game {
    /// Set up a game for `player_count` players (2-4) from `seed`.
    ///
    /// The seed fixes the deck shuffle, the merchant-tile deal, and the
    /// starting player, so equal seeds give byte-equal games.
    #[must_use]
    pub fn new(player_count: usize, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let board = Board::new(player_count, &mut rng);
        let players = PlayerMap::new(player_count, |_| PlayerState::new(roster()));
        let mut deck = Deck::standard(player_count);
        deck.shuffle(&mut rng);
        let active = PlayerId::new(rng.gen_range(0..player_count) as u8);

        let mut game = Self {
            board,
            players,
            deck,
            active,
            sequence: 0,
            history: Vector::new(),
            rng,
        };
        game.deal_hands();
        game
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    /// Number of actions committed so far.
    #[must_use]
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// The committed action log, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Clone this game with an independent RNG branch.
    ///
    /// The fork replays identically until a shuffle, after which the two
    /// games diverge deterministically.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        let rng = self.rng.fork();
        Self { rng, ..self.clone() }
    }

    /// Draw the top card into `player`'s hand. False once the deck is out.
    pub fn draw_card(&mut self, player: PlayerId) -> bool {
        match self.deck.draw() {
            Some(card) => {
                self.players[player].add_card(card);
                true
            }
            None => false,
        }
    }

    /// Discard a card from `player`'s hand (the per-action card payment,
    /// which the driving loop settles between actions).
    pub fn discard_card(&mut self, player: PlayerId, card: CardId) -> Result<(), RuleViolation> {
        let card = self.players[player]
            .take_card(card)
            .ok_or(RuleViolation::CardNotInHand(card))?;
        self.deck.discard(card);
        Ok(())
    }

    pub(crate) fn record(&mut self, record: ActionRecord) {
        self.history.push_back(record);
        self.sequence += 1;
        let next = (self.active.index() + 1) % self.players.player_count();
        self.active = PlayerId::new(next as u8);
    }

    pub(crate) fn deal_hands(&mut self) {
        for player in self.players.player_ids().collect::<Vec<_>>() {
            for _ in 0..STARTING_HAND_SIZE {
                if !self.draw_card(player) {
                    return;
                }
            }
        }
    }

    pub(crate) fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }
}
