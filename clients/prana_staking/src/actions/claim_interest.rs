//! Claim interest handler.
//!
//! Pays out the interest accrued since the last claim without unstaking.

use std::time::Instant;

use crate::actions::{ActionKind, StakeActions};
use crate::error::ClientError;
use crate::provider::TxHash;

impl StakeActions {
    /// Sends `claimInterest(stakeId)`.
    ///
    /// On success the contract moves the stake's `lastClaimTime` to the
    /// block time, so accrued interest restarts from zero after the refetch.
    pub async fn claim_interest(
        &mut self,
        stake_id: u32,
        now: Instant,
    ) -> Result<TxHash, ClientError> {
        self.run(stake_id, ActionKind::ClaimInterest, now).await
    }
}
