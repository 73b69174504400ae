use anchor_lang::{require, Result};
use indexmap::IndexMap;

use crate::constants::DurationOption;
use crate::error::StakingError;

/// Duration (seconds) to APR (whole percent), in the order `getAllAPRs`
/// returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AprSchedule {
    rates: IndexMap<u32, u8>,
}

impl AprSchedule {
    /// Zips the two arrays returned by `getAllAPRs()`.
    pub fn from_parts(durations: &[u32], aprs: &[u8]) -> Result<Self> {
        require!(
            durations.len() == aprs.len(),
            StakingError::InvalidAprSchedule
        );
        let rates = durations
            .iter()
            .copied()
            .zip(aprs.iter().copied())
            .collect();
        Ok(Self { rates })
    }

    pub fn apr_for(&self, duration_seconds: u32) -> Option<u8> {
        self.rates.get(&duration_seconds).copied()
    }

    /// Slider label for a duration option: `"10% APR"`, or empty while the
    /// rate is unknown.
    pub fn label_for(&self, option: &DurationOption) -> String {
        self.apr_for(option.seconds)
            .map(|apr| format!("{apr}% APR"))
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u8)> + '_ {
        self.rates.iter().map(|(duration, apr)| (*duration, *apr))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
