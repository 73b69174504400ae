use anchor_lang::Result;
use borsh_derive::{BorshDeserialize, BorshSerialize};

use crate::address::Address;
use crate::error::StakingError;
use crate::state::Stake;

/// The stake list of one owner as last read from the contract.
///
/// Encoded with Borsh; the digest of the encoding tells a refetch whether
/// anything changed since the rows were built.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StakeSnapshot {
    pub owner: Address,
    pub stakes: Vec<Stake>,
}

impl StakeSnapshot {
    pub fn new(owner: Address, stakes: Vec<Stake>) -> Self {
        Self { owner, stakes }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let bytes = borsh::to_vec(self).map_err(|_| StakingError::InvalidSnapshot)?;
        Ok(bytes)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let snapshot = borsh::from_slice(data).map_err(|_| StakingError::InvalidSnapshot)?;
        Ok(snapshot)
    }

    /// blake3 hash of the Borsh encoding.
    pub fn digest(&self) -> Result<[u8; 32]> {
        let bytes = self.to_bytes()?;
        Ok(*blake3::hash(&bytes).as_bytes())
    }

    pub fn find(&self, stake_id: u32) -> Option<&Stake> {
        self.stakes.iter().find(|stake| stake.id == stake_id)
    }

    /// Sum of all principals, `None` on overflow.
    pub fn total_staked(&self) -> Option<u128> {
        self.stakes
            .iter()
            .try_fold(0u128, |total, stake| total.checked_add(stake.amount))
    }
}
