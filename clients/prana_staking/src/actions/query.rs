//! Contract reads behind the dashboard.

use log::debug;

use crate::address::Address;
use crate::config::DeploymentConfig;
use crate::error::{ClientError, StakingError};
use crate::provider::StakingReader;
use crate::state::{AprSchedule, StakeSnapshot};

/// Token held by the staking and interest contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractBalances {
    pub staking: u128,
    pub interest: u128,
}

/// Reads `getAllAPRs()` into a schedule.
pub async fn load_apr_schedule(reader: &dyn StakingReader) -> Result<AprSchedule, ClientError> {
    let (durations, aprs) = reader.get_all_aprs().await?;
    let schedule = AprSchedule::from_parts(&durations, &aprs)?;
    debug!("loaded {} APR tiers", schedule.len());
    Ok(schedule)
}

/// Reads `getStakerStakes(owner)`. Every record is validated; one malformed
/// record fails the whole load.
pub async fn load_stakes(
    reader: &dyn StakingReader,
    owner: &Address,
) -> Result<StakeSnapshot, ClientError> {
    let stakes = reader.get_staker_stakes(owner).await?;
    for stake in &stakes {
        stake.validate()?;
    }
    debug!("loaded {} stakes for {}", stakes.len(), owner);
    Ok(StakeSnapshot::new(*owner, stakes))
}

pub async fn token_balance(reader: &dyn StakingReader, owner: &Address) -> Result<u128, ClientError> {
    reader
        .token_balance_of(owner)
        .await
        .map_err(ClientError::from)
}

/// Token balances of the staking pool and of the interest reserve.
pub async fn contract_balances(
    reader: &dyn StakingReader,
    config: &DeploymentConfig,
) -> Result<ContractBalances, ClientError> {
    let staking = reader.token_balance_of(&config.staking_address).await?;
    let interest = reader.token_balance_of(&config.interest_address).await?;
    debug!("contract balances: staking {} interest {}", staking, interest);
    Ok(ContractBalances { staking, interest })
}

/// Fails with `InvalidConfig` if the token reports other decimals than the
/// deployment was configured with.
pub async fn check_token_decimals(
    reader: &dyn StakingReader,
    config: &DeploymentConfig,
) -> Result<(), ClientError> {
    let decimals = reader.token_decimals().await?;
    if decimals != config.token_decimals {
        debug!(
            "token reports {} decimals, configured {}",
            decimals, config.token_decimals
        );
        return Err(StakingError::InvalidConfig.into());
    }
    Ok(())
}
