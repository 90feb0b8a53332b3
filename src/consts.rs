//! Game constants: starting resources, action prices, market capacities.

/// Cash each player starts with.
pub const STARTING_MONEY: i64 = 17;

/// Starting income track position (level 0).
pub const STARTING_INCOME: i32 = 10;

/// Link tokens per player per era.
pub const STARTING_LINK_TOKENS: u8 = 14;

/// Cards dealt to each player at the start of each era.
pub const STARTING_HAND_SIZE: usize = 8;

/// Coal market capacity; one space starts empty.
pub const MAX_MARKET_COAL: u32 = 14;

/// Iron market capacity; two spaces start empty.
pub const MAX_MARKET_IRON: u32 = 10;

/// Price of one canal link.
pub const CANAL_COST: i64 = 3;

/// Price of a single rail link, plus the coal it consumes.
pub const ONE_RAIL_COST: i64 = 5;
pub const ONE_RAIL_COAL: u8 = 1;

/// Price of the double-rail action: two links, a coal per link, one beer.
pub const TWO_RAIL_COST: i64 = 15;
pub const TWO_RAIL_BEER: u8 = 1;

/// Loan proceeds and income-level penalty.
pub const LOAN_AMOUNT: i64 = 30;
pub const LOAN_INCOME_LEVELS: u32 = 3;

/// Minimum income level at which a loan is still legal.
pub const LOAN_MIN_LEVEL: i32 = 3;
