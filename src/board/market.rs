//! Step-priced resource markets.
//!
//! Coal and iron each have a shared market track. The track drains from
//! the cheap end: the fuller the market, the cheaper the next unit. An
//! empty market still sells at a flat premium (the general supply), and a
//! flipped mine or works can sell surplus back onto the track for cash.

use serde::{Deserialize, Serialize};

/// The three consumable resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Coal,
    Iron,
    Beer,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Coal => "coal",
            ResourceKind::Iron => "iron",
            ResourceKind::Beer => "beer",
        };
        f.write_str(name)
    }
}

/// One resource market track.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMarket {
    remaining: u32,
    capacity: u32,
    /// Per-unit price once the track is empty (the general supply).
    empty_price: i64,
}

impl ResourceMarket {
    /// The coal market: 14 spaces, one empty at setup.
    #[must_use]
    pub fn coal() -> Self {
        Self {
            remaining: crate::consts::MAX_MARKET_COAL - 1,
            capacity: crate::consts::MAX_MARKET_COAL,
            empty_price: 8,
        }
    }

    /// The iron market: 10 spaces, two empty at setup.
    #[must_use]
    pub fn iron() -> Self {
        Self {
            remaining: crate::consts::MAX_MARKET_IRON - 2,
            capacity: crate::consts::MAX_MARKET_IRON,
            empty_price: 6,
        }
    }

    /// Units currently on the track.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Price of the next unit at the current fill level.
    ///
    /// Each pair of spaces shares a price step; the track bottoms out at 1
    /// and the general supply charges `empty_price`.
    #[must_use]
    pub fn unit_price(&self) -> i64 {
        Self::price_at(self.remaining, self.empty_price)
    }

    fn price_at(remaining: u32, empty_price: i64) -> i64 {
        if remaining == 0 {
            empty_price
        } else {
            (empty_price - i64::from(remaining + 1) / 2).max(1)
        }
    }

    /// Total cost of buying `units` without mutating the track.
    #[must_use]
    pub fn price_for(&self, units: u32) -> i64 {
        let mut remaining = self.remaining;
        let mut total = 0;
        for _ in 0..units {
            total += Self::price_at(remaining, self.empty_price);
            remaining = remaining.saturating_sub(1);
        }
        total
    }

    /// Buy `units`, draining the track, and return the total cost.
    ///
    /// Units beyond the track come from the general supply at `empty_price`
    /// each; the market itself never runs out.
    pub fn take(&mut self, units: u32) -> i64 {
        let cost = self.price_for(units);
        self.remaining = self.remaining.saturating_sub(units);
        cost
    }

    /// Sell up to `units` onto the track; returns (units absorbed, payout).
    ///
    /// Each unit earns the price of the space it fills. Units past capacity
    /// are discarded unpaid.
    pub fn accept(&mut self, units: u32) -> (u32, i64) {
        let mut absorbed = 0;
        let mut payout = 0;
        for _ in 0..units {
            if self.remaining >= self.capacity {
                break;
            }
            self.remaining += 1;
            payout += Self::price_at(self.remaining, self.empty_price);
            absorbed += 1;
        }
        (absorbed, payout)
    }

    /// Whether the track has at least one empty space.
    #[must_use]
    pub fn has_space(&self) -> bool {
        self.remaining < self.capacity
    }
}
