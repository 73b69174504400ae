//! Action handlers for the staking client.
//!
//! This module contains the flows behind each button of the staking UI:
//! reads, permit-then-stake, claim, unstake and early unstake.

pub mod claim_interest;
pub mod query;
pub mod stake;
pub mod unstake;

pub use query::*;
pub use stake::*;

use std::{sync::Arc, time::Instant};

use log::{info, warn};

use crate::error::ClientError;
use crate::provider::{Confirm, StakingWriter, TxHash};
use crate::view::StatusBanner;

/// Which per-stake action is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    ClaimInterest,
    Unstake,
    UnstakeEarly,
}

impl ActionKind {
    fn failure_prefix(self) -> &'static str {
        match self {
            ActionKind::ClaimInterest => "Failed to claim interest",
            ActionKind::Unstake => "Failed to unstake",
            ActionKind::UnstakeEarly => "Failed to unstake early",
        }
    }

    fn success_prefix(self) -> &'static str {
        match self {
            ActionKind::ClaimInterest => "Interest claimed successfully!",
            ActionKind::Unstake => "Unstaked successfully!",
            ActionKind::UnstakeEarly => "Unstaked early successfully!",
        }
    }
}

/// Hook run after an action lands, typically a stake-list refetch.
pub type Refetch = Arc<dyn Fn() + Send + Sync>;

/// Claim / unstake / early-unstake buttons of the active stakes list.
///
/// One action runs at a time; `action_loading` names the stake and the
/// action while it is in flight.
pub struct StakeActions {
    writer: Arc<dyn StakingWriter>,
    confirm: Arc<dyn Confirm>,
    refetch: Option<Refetch>,
    action_loading: Option<(u32, ActionKind)>,
    pub banner: StatusBanner,
}

impl StakeActions {
    pub fn new(
        writer: Arc<dyn StakingWriter>,
        confirm: Arc<dyn Confirm>,
        banner: StatusBanner,
    ) -> Self {
        Self {
            writer,
            confirm,
            refetch: None,
            action_loading: None,
            banner,
        }
    }

    pub fn with_refetch(mut self, refetch: Refetch) -> Self {
        self.refetch = Some(refetch);
        self
    }

    pub fn action_loading(&self) -> Option<(u32, ActionKind)> {
        self.action_loading
    }

    /// Submits one per-stake action and reports the outcome on the banner.
    ///
    /// Collaborator failures are shown verbatim after a short prefix; no
    /// retry is attempted.
    async fn run(
        &mut self,
        stake_id: u32,
        kind: ActionKind,
        now: Instant,
    ) -> Result<TxHash, ClientError> {
        self.action_loading = Some((stake_id, kind));
        self.banner.clear_error();

        let result = match kind {
            ActionKind::ClaimInterest => self.writer.claim_interest(stake_id).await,
            ActionKind::Unstake => self.writer.unstake(stake_id).await,
            ActionKind::UnstakeEarly => self.writer.unstake_early(stake_id).await,
        };
        self.action_loading = None;

        match result {
            Ok(tx_hash) => {
                info!("{:?} for stake {} sent: {}", kind, stake_id, tx_hash);
                self.banner.set_success(
                    format!(
                        "{} Transaction: {}...",
                        kind.success_prefix(),
                        short_hash(&tx_hash)
                    ),
                    now,
                );
                if let Some(refetch) = &self.refetch {
                    refetch();
                }
                Ok(tx_hash)
            }
            Err(err) => {
                warn!("{:?} for stake {} failed: {}", kind, stake_id, err);
                self.banner
                    .set_error(format!("{}: {}", kind.failure_prefix(), err.message()), now);
                Err(err.into())
            }
        }
    }
}

/// First ten characters of a transaction hash (`0x` + 8 hex digits).
pub fn short_hash(tx_hash: &str) -> &str {
    tx_hash.get(..10).unwrap_or(tx_hash)
}
