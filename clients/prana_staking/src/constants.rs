//! Client constants for the PRANA staking contracts.
//!
//! This module defines the fixed values the client shares with the deployed
//! contracts: token precision, time periods, the interest fixed-point scale
//! and the enumerated lock durations.

/// Decimals of the PRANA token. Fixed for this deployment.
pub const TOKEN_DECIMALS: u8 = 9;

/// Display symbol of the staking token.
pub const TOKEN_SYMBOL: &str = "PRANA";

/// Number of seconds in a day
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Number of seconds in a year (365 days)
pub const SECONDS_PER_YEAR: u128 = 365 * 86_400;

/// APR values are whole percents (same as the contract's PERCENT_SCALE)
pub const PERCENT_SCALE: u128 = 100;

/// Fixed-point scale for the per-second growth factor (10^18)
pub const RATE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Principal percentage withheld by `unstakeEarly`
pub const EARLY_UNSTAKE_PENALTY_PERCENT: u8 = 10;

/// Lifetime of a signed permit, counted from the moment it is built
pub const PERMIT_VALIDITY_SECS: u32 = 3_600;

/// Banner messages clear themselves after this many seconds
pub const MESSAGE_RESET_SECS: u64 = 10;

/// Interval of the live reference clock, in milliseconds
pub const TICK_INTERVAL_MS: u64 = 1_000;

/// Minimum stake shown before `MIN_STAKE()` has been read, in whole tokens
pub const FALLBACK_MIN_STAKE_TOKENS: u128 = 100;

/// Duration option selected when the stake form opens (30 days)
pub const DEFAULT_DURATION_INDEX: usize = 2;

/// A lock period offered by the staking contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationOption {
    pub days: u32,
    pub label: &'static str,
    pub seconds: u32,
}

impl DurationOption {
    const fn new(days: u32, label: &'static str) -> Self {
        Self {
            days,
            label,
            seconds: days * SECONDS_PER_DAY,
        }
    }

    /// Looks up the option whose lock length is exactly `seconds`.
    pub fn from_seconds(seconds: u32) -> Option<&'static DurationOption> {
        DURATION_OPTIONS.iter().find(|option| option.seconds == seconds)
    }

    /// Returns the option at `index` of [`DURATION_OPTIONS`].
    pub fn at(index: usize) -> Option<&'static DurationOption> {
        DURATION_OPTIONS.get(index)
    }
}

/// Lock durations accepted by `stakeWithPermit`, shortest first.
pub static DURATION_OPTIONS: [DurationOption; 6] = [
    DurationOption::new(1, "1 Day"),
    DurationOption::new(7, "7 Days"),
    DurationOption::new(30, "30 Days"),
    DurationOption::new(90, "90 Days"),
    DurationOption::new(180, "180 Days"),
    DurationOption::new(365, "365 Days"),
];

/// Returns `true` if `seconds` is one of the enumerated lock durations.
pub fn is_valid_duration(seconds: u32) -> bool {
    DurationOption::from_seconds(seconds).is_some()
}
