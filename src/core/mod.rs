//! Core identity, player-state, and RNG types.

pub mod ids;
pub mod player;
pub mod rng;

pub use ids::{BuildingId, CardId, EdgeId, LocationId, TownId, TradePostId};
pub use player::{PlayerId, PlayerMap, PlayerState};
pub use rng::{GameRng, GameRngState};
