//! Fixed-point token amounts.
//!
//! On-chain amounts are integers in the token's smallest unit. Display text
//! divides by `10^decimals` and drops trailing fractional zeros; user input
//! goes the other way and must not carry more precision than the token has.

use anchor_lang::{require, Result};

use crate::error::StakingError;

/// Formats `amount` smallest units as a decimal string.
///
/// `format_units(1_500_000_000, 9) == "1.5"`, `format_units(0, 9) == "0"`.
pub fn format_units(amount: u128, decimals: u8) -> String {
    let digits = amount.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let (whole, fraction) = if digits.len() > decimals {
        let split = digits.len() - decimals;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        ("0".to_string(), format!("{digits:0>decimals$}"))
    };

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole
    } else {
        format!("{whole}.{fraction}")
    }
}

/// Returns true for text the amount field accepts while typing:
/// digits with at most one decimal point, or nothing at all.
pub fn is_amount_input(text: &str) -> bool {
    let mut seen_point = false;
    text.chars().all(|c| match c {
        '0'..='9' => true,
        '.' if !seen_point => {
            seen_point = true;
            true
        }
        _ => false,
    })
}

/// Parses a decimal string into smallest units.
pub fn parse_units(text: &str, decimals: u8) -> Result<u128> {
    let text = text.trim();
    require!(
        !text.is_empty() && text != "." && is_amount_input(text),
        StakingError::InvalidAmount
    );

    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    require!(
        fraction.len() <= decimals as usize,
        StakingError::InvalidAmount
    );

    let scale = 10u128
        .checked_pow(decimals as u32)
        .ok_or(StakingError::MathOverflow)?;

    let whole_units = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .map_err(|_| StakingError::InvalidAmount)?
            .checked_mul(scale)
            .ok_or(StakingError::InvalidAmount)?
    };

    let fraction_units = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{fraction:0<width$}", width = decimals as usize);
        padded
            .parse::<u128>()
            .map_err(|_| StakingError::InvalidAmount)?
    };

    let amount = whole_units
        .checked_add(fraction_units)
        .ok_or(StakingError::InvalidAmount)?;
    Ok(amount)
}
