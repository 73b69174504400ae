use anchor_lang::Result;

use crate::constants::{DurationOption, TOKEN_DECIMALS};
use crate::interest::{calculate_accrued_interest, calculate_guaranteed_interest_at_maturity};
use crate::state::{Stake, StakeSnapshot};
use crate::units::format_units;

/// Display figures for one stake card, computed for a given reference time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeRow {
    pub id: u32,
    pub amount: String,
    pub apr: u8,
    pub duration_label: String,
    pub start_time: u64,
    pub end_time: u64,
    pub progress_percent: u8,
    pub is_matured: bool,
    pub accrued_interest: String,
    pub guaranteed_interest: String,
    pub can_claim_interest: bool,
    pub can_unstake: bool,
    pub can_unstake_early: bool,
}

impl StakeRow {
    /// Figures for `stake` at `now`, amounts formatted with `decimals`.
    pub fn build(stake: &Stake, now: u64, decimals: u8) -> Result<Self> {
        let accrued = calculate_accrued_interest(stake, now)?;
        let guaranteed = calculate_guaranteed_interest_at_maturity(stake)?;
        let is_matured = stake.is_matured(now);

        Ok(StakeRow {
            id: stake.id,
            amount: format_units(stake.amount, decimals),
            apr: stake.apr,
            duration_label: duration_label(stake.duration),
            start_time: stake.start_time as u64,
            end_time: stake.maturity_time(),
            progress_percent: stake.progress_percent(now),
            is_matured,
            accrued_interest: format_units(accrued, decimals),
            guaranteed_interest: format_units(guaranteed, decimals),
            can_claim_interest: stake.has_claimable_time(now),
            can_unstake: is_matured,
            can_unstake_early: !is_matured,
        })
    }

    /// Rebuilds the live figures of every stake for `now`.
    pub fn build_all(stakes: &[Stake], now: u64, decimals: u8) -> Result<Vec<Self>> {
        stakes
            .iter()
            .map(|stake| Self::build(stake, now, decimals))
            .collect()
    }
}

/// The active stakes list: the last fetched snapshot and its rows.
///
/// A refetch that returns the same snapshot keeps the current rows; only
/// the clock moves them forward.
#[derive(Debug)]
pub struct ActiveStakes {
    decimals: u8,
    snapshot: Option<StakeSnapshot>,
    digest: Option<[u8; 32]>,
    rows: Vec<StakeRow>,
}

impl Default for ActiveStakes {
    fn default() -> Self {
        Self::new(TOKEN_DECIMALS)
    }
}

impl ActiveStakes {
    /// An empty list whose rows format amounts with `decimals`, normally
    /// `DeploymentConfig::token_decimals`.
    pub fn new(decimals: u8) -> Self {
        Self {
            decimals,
            snapshot: None,
            digest: None,
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[StakeRow] {
        &self.rows
    }

    pub fn snapshot(&self) -> Option<&StakeSnapshot> {
        self.snapshot.as_ref()
    }

    /// Replaces the snapshot. Returns false when it is unchanged.
    pub fn refresh(&mut self, snapshot: StakeSnapshot, now: u64) -> Result<bool> {
        let digest = snapshot.digest()?;
        if self.digest == Some(digest) {
            return Ok(false);
        }
        self.rows = StakeRow::build_all(&snapshot.stakes, now, self.decimals)?;
        self.digest = Some(digest);
        self.snapshot = Some(snapshot);
        Ok(true)
    }

    /// Recomputes the live figures for a new reference time.
    pub fn retick(&mut self, now: u64) -> Result<()> {
        if let Some(snapshot) = &self.snapshot {
            self.rows = StakeRow::build_all(&snapshot.stakes, now, self.decimals)?;
        }
        Ok(())
    }
}

/// `"30 Days"` for enumerated durations, otherwise whole days.
fn duration_label(seconds: u32) -> String {
    match DurationOption::from_seconds(seconds) {
        Some(option) => option.label.to_string(),
        None => {
            let days = seconds / crate::constants::SECONDS_PER_DAY;
            if days == 1 {
                "1 Day".to_string()
            } else {
                format!("{days} Days")
            }
        }
    }
}
