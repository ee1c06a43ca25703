// Phase holds
pub const RED_HOLD_MS: u64 = 5_000;
pub const GREEN_HOLD_MS: u64 = 5_000;
pub const YELLOW_HOLD_MS: u64 = 2_000;

// Dispatcher tick
pub const DISPATCH_TICK_MS: u64 = 1_000;

// Crossing duration bounds, drawn uniformly from [min, max)
pub const CROSSING_MIN_MS: u64 = 2_000;
pub const CROSSING_MAX_MS: u64 = 4_000;
