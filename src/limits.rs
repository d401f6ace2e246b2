//! Operational bounds and policy defaults.

/// How many days ahead the slot suggester will look for a free
/// same-time-of-day slot before giving up.
pub const MAX_DAY_ADVANCE: u64 = 7;

/// Most alternative slots ever returned for one candidate.
pub const MAX_SUGGESTIONS: usize = 3;

/// Remaining units below which a fulfillable line still warns.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 2;

/// Instruments only warn when fulfillment would leave zero units.
pub const INSTRUMENT_LOW_STOCK_THRESHOLD: u32 = 0;

/// Form-edit debounce before revalidating against the snapshot source.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
