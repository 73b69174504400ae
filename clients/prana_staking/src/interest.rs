//! Interest projection for stake records.
//!
//! Mirrors the contract's linear accrual: `apr` whole percent per 365-day
//! year, applied per second, never past maturity. The per-second growth
//! factor is held in fixed point with a `10^18` scale and the final
//! principal multiply-divide runs in arbitrary precision, so the figures
//! agree with what `claimInterest` would pay out.

use anchor_lang::Result;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::constants::*;
use crate::error::StakingError;
use crate::state::Stake;

/// Fixed-point growth of one unit of principal over `elapsed` seconds.
///
/// `floor(apr * RATE_SCALE * elapsed / (PERCENT_SCALE * SECONDS_PER_YEAR))`
pub fn growth_factor(apr: u8, elapsed: u64) -> Result<u128> {
    let scaled_rate = (apr as u128)
        .checked_mul(RATE_SCALE)
        .ok_or(StakingError::MathOverflow)?;
    let growth = scaled_rate
        .checked_mul(elapsed as u128)
        .ok_or(StakingError::MathOverflow)?
        .checked_div(
            PERCENT_SCALE
                .checked_mul(SECONDS_PER_YEAR)
                .ok_or(StakingError::MathOverflow)?,
        )
        .ok_or(StakingError::MathOverflow)?;
    Ok(growth)
}

/// `floor(amount * growth / RATE_SCALE)`, narrowed back to `u128`.
fn apply_growth(amount: u128, growth: u128) -> Result<u128> {
    let interest = BigUint::from(amount) * BigUint::from(growth) / BigUint::from(RATE_SCALE);
    let interest = interest.to_u128().ok_or(StakingError::MathOverflow)?;
    Ok(interest)
}

/// Interest accrued since the last claim, as of `reference_time`.
///
/// Accrual stops at maturity. Returns 0 whenever `reference_time` is at or
/// before `last_claim_time`.
///
/// # Errors
/// `InvalidStakeRecord` for a zero amount or duration, or a claim time
/// before the start time.
pub fn calculate_accrued_interest(stake: &Stake, reference_time: u64) -> Result<u128> {
    stake.validate()?;

    let effective_time = reference_time.min(stake.maturity_time());
    let elapsed = effective_time.saturating_sub(stake.last_claim_time as u64);
    if elapsed == 0 {
        return Ok(0);
    }

    let growth = growth_factor(stake.apr, elapsed)?;
    apply_growth(stake.amount, growth)
}

/// Total interest the stake yields over its full term.
///
/// This is a projection from the start of the stake: partial claims do not
/// reduce it.
pub fn calculate_guaranteed_interest_at_maturity(stake: &Stake) -> Result<u128> {
    stake.validate()?;
    projected_interest(stake.amount, stake.apr, stake.duration)
}

/// Interest on `amount` held for `duration` seconds at `apr` percent.
pub fn projected_interest(amount: u128, apr: u8, duration: u32) -> Result<u128> {
    let growth = growth_factor(apr, duration as u64)?;
    apply_growth(amount, growth)
}

/// Principal withheld by `unstakeEarly`.
pub fn early_unstake_penalty(amount: u128) -> u128 {
    amount / 100 * EARLY_UNSTAKE_PENALTY_PERCENT as u128
        + amount % 100 * EARLY_UNSTAKE_PENALTY_PERCENT as u128 / 100
}
