use anchor_lang::{require, Result};
use borsh_derive::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::constants::{DurationOption, TOKEN_DECIMALS};
use crate::error::StakingError;
use crate::state::AprSchedule;
use crate::units::parse_units;

/// One entry of `getStakerStakes(address)`.
///
/// Immutable apart from `last_claim_time`, which the contract advances on
/// every interest claim.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Stake {
    pub id: u32,
    #[serde(with = "amount_text")]
    pub amount: u128,
    pub start_time: u32,
    pub duration: u32,
    pub apr: u8,
    pub last_claim_time: u32,
}

impl Stake {
    /// Checks the invariants every contract-sourced record satisfies.
    pub fn validate(&self) -> Result<()> {
        require!(self.amount > 0, StakingError::InvalidStakeRecord);
        require!(self.duration > 0, StakingError::InvalidStakeRecord);
        require!(
            self.last_claim_time >= self.start_time,
            StakingError::InvalidStakeRecord
        );
        Ok(())
    }

    /// Unix time at which the lock ends.
    pub fn maturity_time(&self) -> u64 {
        self.start_time as u64 + self.duration as u64
    }

    pub fn is_matured(&self, now: u64) -> bool {
        now >= self.maturity_time()
    }

    /// Whole percent of the lock that has elapsed at `now`, clamped to 0..=100.
    pub fn progress_percent(&self, now: u64) -> u8 {
        if self.duration == 0 {
            return 100;
        }
        let elapsed = now
            .saturating_sub(self.start_time as u64)
            .min(self.duration as u64);
        (elapsed * 100 / self.duration as u64) as u8
    }

    /// True while some accrual window lies between the last claim and `now`.
    pub fn has_claimable_time(&self, now: u64) -> bool {
        now.min(self.maturity_time()) > self.last_claim_time as u64
    }

    /// Builds a record from ABI words, rejecting amounts wider than 128 bits.
    pub fn from_abi(
        id: u32,
        amount: &[u8; 32],
        start_time: u32,
        duration: u32,
        apr: u8,
        last_claim_time: u32,
    ) -> Result<Self> {
        let stake = Stake {
            id,
            amount: amount_from_word(amount)?,
            start_time,
            duration,
            apr,
            last_claim_time,
        };
        stake.validate()?;
        Ok(stake)
    }
}

/// Narrows a big-endian `uint256` word to `u128`.
pub fn amount_from_word(word: &[u8; 32]) -> Result<u128> {
    let (high, low) = word.split_at(16);
    require!(
        high.iter().all(|b| *b == 0),
        StakingError::InvalidStakeRecord
    );
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(low);
    Ok(u128::from_be_bytes(bytes))
}

/// A stake that exists only in the form: what the user would lock if they
/// submitted now. Used for projections before anything is signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeDraft {
    pub amount: u128,
    pub duration: &'static DurationOption,
    pub apr: u8,
}

impl StakeDraft {
    /// Builds a draft from raw form values.
    ///
    /// An APR missing from the schedule yields `InvalidDuration`: the
    /// contract would refuse the stake.
    pub fn from_form(
        amount_text: &str,
        duration_index: usize,
        schedule: &AprSchedule,
    ) -> Result<Self> {
        let amount = parse_units(amount_text, TOKEN_DECIMALS)?;
        require!(amount > 0, StakingError::InvalidAmount);
        let duration = DurationOption::at(duration_index).ok_or(StakingError::InvalidDuration)?;
        let apr = schedule
            .apr_for(duration.seconds)
            .ok_or(StakingError::InvalidDuration)?;
        Ok(StakeDraft {
            amount,
            duration,
            apr,
        })
    }

    /// The record the contract would create if the stake landed at `now`.
    pub fn to_stake(&self, now: u32) -> Stake {
        Stake {
            id: 0,
            amount: self.amount,
            start_time: now,
            duration: self.duration.seconds,
            apr: self.apr,
            last_claim_time: now,
        }
    }
}

/// Amounts travel as decimal strings so that no JSON layer rounds them
/// through a float. Plain non-negative integers are accepted on input.
mod amount_text {
    use std::fmt;

    use serde::{de, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(amount)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }

    struct AmountVisitor;

    impl<'de> de::Visitor<'de> for AmountVisitor {
        type Value = u128;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer amount in smallest units")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u128, E> {
            Ok(v as u128)
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<u128, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u128, E> {
            u128::try_from(v).map_err(|_| E::custom(format!("negative amount {v}")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u128, E> {
            v.parse()
                .map_err(|_| E::custom(format!("non-numeric amount {v:?}")))
        }
    }
}
