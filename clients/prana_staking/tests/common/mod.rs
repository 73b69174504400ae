//! In-memory collaborators for the integration tests.
//!
//! `MockChain` plays the RPC node, the contracts and the wallet at once and
//! records every state-changing call it receives.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use prana_staking::{
    error::ProviderError,
    permit::{PermitDomain, PermitMessage, StakeWithPermitArgs},
    provider::{PermitSigner, ProviderResult, StakingReader, StakingWriter, TxHash},
    Address, Stake,
};

pub const T: u32 = 1_700_000_000;
pub const ONE_TOKEN: u128 = 1_000_000_000;
pub const TX_HASH: &str = "0x5f2a9c0d11aa22bb33cc44dd55ee66ff00112233445566778899aabbccddeeff";

pub fn owner() -> Address {
    Address([0x11; 20])
}

pub fn stake(id: u32, amount: u128, duration: u32, apr: u8) -> Stake {
    Stake {
        id,
        amount,
        start_time: T,
        duration,
        apr,
        last_claim_time: T,
    }
}

/// 65 bytes: r = 0x01.., s = 0x02.., v = 0 (normalized to 27).
pub fn signature_hex() -> String {
    format!("0x{}{}00", "01".repeat(32), "02".repeat(32))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    StakeWithPermit(StakeWithPermitArgs),
    ClaimInterest(u32),
    Unstake(u32),
    UnstakeEarly(u32),
    SignPermit(PermitDomain, PermitMessage),
}

pub struct MockChain {
    pub stakes: Mutex<Vec<Stake>>,
    pub durations: Vec<u32>,
    pub aprs: Vec<u8>,
    pub min_stake: ProviderResult<u128>,
    pub nonce: u128,
    pub decimals: u8,
    pub balances: Vec<(Address, u128)>,
    /// When set, every write and signature request fails with it.
    pub failure: Mutex<Option<ProviderError>>,
    pub calls: Mutex<Vec<Call>>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self {
            stakes: Mutex::new(Vec::new()),
            durations: vec![86_400, 604_800, 2_592_000, 7_776_000, 15_552_000, 31_536_000],
            aprs: vec![2, 4, 6, 8, 10, 12],
            min_stake: Ok(100 * ONE_TOKEN),
            nonce: 3,
            decimals: 9,
            balances: Vec::new(),
            failure: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockChain {
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn fail_with(&self, err: ProviderError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> ProviderResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StakingReader for MockChain {
    async fn get_staker_stakes(&self, _staker: &Address) -> ProviderResult<Vec<Stake>> {
        Ok(self.stakes.lock().unwrap().clone())
    }

    async fn get_all_aprs(&self) -> ProviderResult<(Vec<u32>, Vec<u8>)> {
        Ok((self.durations.clone(), self.aprs.clone()))
    }

    async fn min_stake(&self) -> ProviderResult<u128> {
        self.min_stake.clone()
    }

    async fn token_balance_of(&self, owner: &Address) -> ProviderResult<u128> {
        Ok(self
            .balances
            .iter()
            .find(|(address, _)| address == owner)
            .map(|(_, balance)| *balance)
            .unwrap_or(0))
    }

    async fn token_decimals(&self) -> ProviderResult<u8> {
        Ok(self.decimals)
    }

    async fn token_nonces(&self, _owner: &Address) -> ProviderResult<u128> {
        Ok(self.nonce)
    }
}

#[async_trait]
impl StakingWriter for MockChain {
    async fn stake_with_permit(&self, args: &StakeWithPermitArgs) -> ProviderResult<TxHash> {
        self.record(Call::StakeWithPermit(*args))?;
        Ok(TX_HASH.to_string())
    }

    async fn claim_interest(&self, stake_id: u32) -> ProviderResult<TxHash> {
        self.record(Call::ClaimInterest(stake_id))?;
        Ok(TX_HASH.to_string())
    }

    async fn unstake(&self, stake_id: u32) -> ProviderResult<TxHash> {
        self.record(Call::Unstake(stake_id))?;
        Ok(TX_HASH.to_string())
    }

    async fn unstake_early(&self, stake_id: u32) -> ProviderResult<TxHash> {
        self.record(Call::UnstakeEarly(stake_id))?;
        Ok(TX_HASH.to_string())
    }
}

#[async_trait]
impl PermitSigner for MockChain {
    async fn sign_permit(
        &self,
        domain: &PermitDomain,
        message: &PermitMessage,
    ) -> ProviderResult<String> {
        self.record(Call::SignPermit(domain.clone(), *message))?;
        Ok(signature_hex())
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
