//! # brass-engine
//!
//! A headless rules engine for a canal-and-rail era economic board game,
//! built for simulation drivers (RL training loops, tree search, replay
//! tooling) rather than interactive play.
//!
//! ## Design Principles
//!
//! 1. **Rules as data**: every legality question has a typed answer.
//!    Predicates return `Result<(), RuleViolation>`, never panic, and the
//!    executor refuses illegal actions without touching state.
//!
//! 2. **Deterministic**: all randomness flows from one seeded, forkable
//!    RNG, so a `(player_count, seed)` pair plus the action log replays a
//!    whole game.
//!
//! 3. **Cheap cloning**: legality probes and search both work on clones;
//!    the board stores tile back-references instead of tile state, and the
//!    action history is a persistent vector.
//!
//! ## Modules
//!
//! - `core`: typed IDs, player state, deterministic RNG
//! - `buildings`: industry tiles and the per-player roster
//! - `cards`: action cards and the scaling deck
//! - `board`: towns, links, trade posts, markets, connectivity queries
//! - `rules`: legality predicates and the error taxonomy
//! - `actions`: action representation, executor, and enumerator
//! - `game`: top-level state and lifecycle
//! - `scoring`: era scoring and the canal-to-rail transition

pub mod actions;
pub mod board;
pub mod buildings;
pub mod cards;
pub mod consts;
pub mod core;
pub mod game;
pub mod rules;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    BuildingId, CardId, EdgeId, GameRng, GameRngState, LocationId, PlayerId, PlayerMap,
    PlayerState, TownId, TradePostId,
};

pub use crate::actions::{Action, ActionRecord};
pub use crate::board::{
    Board, Era, Link, LinkKind, MerchantGood, Node, Placed, ResourceKind, ResourceMarket,
    ResourceSource, TradePost,
};
pub use crate::buildings::{roster, Building, BuildingKind};
pub use crate::cards::{Card, CardKind, Deck, IndustryCardKind};
pub use crate::game::Game;
pub use crate::rules::{
    ActionError, EraError, InsufficientFunds, ResourceError, RuleViolation,
};
