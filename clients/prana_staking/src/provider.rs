//! Interfaces of the external collaborators.
//!
//! The wallet, the JSON-RPC endpoint and the deployed contracts are not part
//! of this crate. Callers plug them in through these traits; every method
//! maps one-to-one onto a contract function or a wallet capability.

use async_trait::async_trait;

use crate::address::Address;
use crate::error::ProviderError;
use crate::permit::{PermitDomain, PermitMessage, StakeWithPermitArgs};
use crate::state::Stake;

/// Hash of a submitted transaction, `0x`-prefixed hex.
pub type TxHash = String;

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Read-only calls against the token and staking contracts.
#[async_trait]
pub trait StakingReader: Send + Sync {
    /// `getStakerStakes(address)`
    async fn get_staker_stakes(&self, staker: &Address) -> ProviderResult<Vec<Stake>>;

    /// `getAllAPRs()`: lock durations in seconds and their APR percent.
    async fn get_all_aprs(&self) -> ProviderResult<(Vec<u32>, Vec<u8>)>;

    /// `MIN_STAKE()`
    async fn min_stake(&self) -> ProviderResult<u128>;

    /// Token `balanceOf(address)`
    async fn token_balance_of(&self, owner: &Address) -> ProviderResult<u128>;

    /// Token `decimals()`
    async fn token_decimals(&self) -> ProviderResult<u8>;

    /// Token `nonces(owner)`, the EIP-2612 replay counter.
    async fn token_nonces(&self, owner: &Address) -> ProviderResult<u128>;
}

/// State-changing calls, sent through the connected wallet.
#[async_trait]
pub trait StakingWriter: Send + Sync {
    async fn stake_with_permit(&self, args: &StakeWithPermitArgs) -> ProviderResult<TxHash>;

    async fn claim_interest(&self, stake_id: u32) -> ProviderResult<TxHash>;

    async fn unstake(&self, stake_id: u32) -> ProviderResult<TxHash>;

    async fn unstake_early(&self, stake_id: u32) -> ProviderResult<TxHash>;
}

/// Typed-data signing capability of the wallet.
#[async_trait]
pub trait PermitSigner: Send + Sync {
    /// Returns the 65-byte `r ‖ s ‖ v` signature as hex.
    async fn sign_permit(
        &self,
        domain: &PermitDomain,
        message: &PermitMessage,
    ) -> ProviderResult<String>;
}

/// Yes/no prompt shown before irreversible actions.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
