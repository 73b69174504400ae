//! Unstake handlers.
//!
//! `unstake` returns the principal of a matured stake; `unstakeEarly`
//! returns it before maturity minus the contract's penalty.

use std::time::Instant;

use log::debug;

use crate::actions::{ActionKind, StakeActions};
use crate::constants::EARLY_UNSTAKE_PENALTY_PERCENT;
use crate::error::ClientError;
use crate::provider::TxHash;

impl StakeActions {
    /// Sends `unstake(stakeId)` for a matured stake.
    pub async fn unstake(&mut self, stake_id: u32, now: Instant) -> Result<TxHash, ClientError> {
        self.run(stake_id, ActionKind::Unstake, now).await
    }

    /// Sends `unstakeEarly(stakeId)` after the user confirms the penalty.
    ///
    /// Returns `Ok(None)` when the user declines; nothing is sent.
    pub async fn unstake_early(
        &mut self,
        stake_id: u32,
        now: Instant,
    ) -> Result<Option<TxHash>, ClientError> {
        if !self.confirm.confirm(&early_unstake_prompt()) {
            debug!("early unstake of stake {} declined", stake_id);
            return Ok(None);
        }
        self.run(stake_id, ActionKind::UnstakeEarly, now)
            .await
            .map(Some)
    }
}

/// Confirmation text shown before an early unstake.
pub fn early_unstake_prompt() -> String {
    format!(
        "Early unstaking incurs a {}% penalty. Are you sure you want to continue?",
        EARLY_UNSTAKE_PENALTY_PERCENT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_penalty() {
        assert_eq!(
            early_unstake_prompt(),
            "Early unstaking incurs a 10% penalty. Are you sure you want to continue?"
        );
    }
}
