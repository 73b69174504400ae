//! Deployment configuration.
//!
//! Contract addresses, chain and token parameters are static for a given
//! deployment. The default is the Polygon mainnet deployment; other
//! deployments are loaded from JSON.

use std::time::Duration;

use anchor_lang::{require, Result};
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::constants::*;
use crate::error::StakingError;
use crate::permit::PermitDomain;

const POLYGON_CHAIN_ID: u64 = 137;
const PRANA_TOKEN_ADDRESS: Address = Address([
    0x92, 0x82, 0x77, 0xe7, 0x74, 0xf3, 0x42, 0x72, 0x71, 0x7e, 0xad, 0xfa, 0xfc, 0x3f, 0xd8,
    0x02, 0xda, 0xfb, 0xd0, 0xf5,
]);
const STAKING_CONTRACT_ADDRESS: Address = Address([
    0x35, 0xa0, 0x9e, 0x66, 0xef, 0x69, 0x0d, 0xc8, 0x43, 0x96, 0x8c, 0x71, 0x99, 0xab, 0xed,
    0x4f, 0x6c, 0x49, 0x06, 0xba,
]);
const INTEREST_CONTRACT_ADDRESS: Address = Address([
    0x33, 0x89, 0xa6, 0xcc, 0xed, 0x6f, 0xb6, 0x95, 0x6d, 0x29, 0x7e, 0x88, 0x98, 0x23, 0xcb,
    0x60, 0x66, 0xc8, 0xf0, 0x36,
]);

/// Static parameters of one staking deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeploymentConfig {
    pub chain_id: u64,

    /// ERC-20 with EIP-2612 permit.
    pub token_address: Address,

    /// Holds principals; target of `stakeWithPermit`, `claimInterest`, `unstake*`.
    pub staking_address: Address,

    /// Holds the interest reserve paid out on claims.
    pub interest_address: Address,

    pub token_symbol: String,
    pub token_decimals: u8,

    /// EIP-712 domain name of the token.
    pub permit_name: String,
    pub permit_version: String,

    /// Seconds before a banner message clears itself.
    pub message_reset_secs: u64,

    /// Period of the live reference clock, in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            chain_id: POLYGON_CHAIN_ID,
            token_address: PRANA_TOKEN_ADDRESS,
            staking_address: STAKING_CONTRACT_ADDRESS,
            interest_address: INTEREST_CONTRACT_ADDRESS,
            token_symbol: TOKEN_SYMBOL.to_string(),
            token_decimals: TOKEN_DECIMALS,
            permit_name: "Prana_v2".to_string(),
            permit_version: "1".to_string(),
            message_reset_secs: MESSAGE_RESET_SECS,
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

impl DeploymentConfig {
    /// Parses a JSON document; missing fields fall back to the defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|_| StakingError::InvalidConfig)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        require!(self.token_decimals > 0, StakingError::InvalidConfig);
        require!(self.token_decimals <= 38, StakingError::InvalidConfig);
        require!(self.message_reset_secs > 0, StakingError::InvalidConfig);
        require!(self.tick_interval_ms > 0, StakingError::InvalidConfig);
        require!(!self.token_address.is_zero(), StakingError::InvalidAddress);
        require!(!self.staking_address.is_zero(), StakingError::InvalidAddress);
        Ok(())
    }

    /// EIP-712 domain the permit is signed under.
    pub fn permit_domain(&self) -> PermitDomain {
        PermitDomain {
            name: self.permit_name.clone(),
            version: self.permit_version.clone(),
            chain_id: self.chain_id,
            verifying_contract: self.token_address,
        }
    }

    pub fn message_reset(&self) -> Duration {
        Duration::from_secs(self.message_reset_secs)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
