//! EIP-2612 permit for the PRANA token.
//!
//! The staking contract pulls tokens with `stakeWithPermit`, so the user
//! signs an off-chain `Permit` instead of sending an `approve` transaction.
//! This module builds the typed data handed to the wallet, computes the
//! EIP-712 digest it signs, and splits the returned signature into the
//! `v`, `r`, `s` arguments the contract expects.

use anchor_lang::{require, Result};
use serde::Serialize;
use serde_json::{json, Value};
use sha3::{Digest, Keccak256};

use crate::address::Address;
use crate::constants::PERMIT_VALIDITY_SECS;
use crate::error::StakingError;

const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

const PERMIT_TYPE: &str =
    "Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)";

fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

fn uint_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// EIP-712 domain of the token contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl PermitDomain {
    pub fn separator(&self) -> [u8; 32] {
        let mut encoded = Vec::with_capacity(32 * 5);
        encoded.extend_from_slice(&keccak256(EIP712_DOMAIN_TYPE.as_bytes()));
        encoded.extend_from_slice(&keccak256(self.name.as_bytes()));
        encoded.extend_from_slice(&keccak256(self.version.as_bytes()));
        encoded.extend_from_slice(&uint_word(self.chain_id as u128));
        encoded.extend_from_slice(&self.verifying_contract.to_word());
        keccak256(&encoded)
    }
}

/// The `Permit` struct the owner signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermitMessage {
    pub owner: Address,
    pub spender: Address,
    pub value: u128,
    pub nonce: u128,
    pub deadline: u32,
}

impl PermitMessage {
    /// A permit for `value` that stays valid for [`PERMIT_VALIDITY_SECS`] from `now`.
    pub fn new(owner: Address, spender: Address, value: u128, nonce: u128, now: u32) -> Result<Self> {
        let deadline = now
            .checked_add(PERMIT_VALIDITY_SECS)
            .ok_or(StakingError::MathOverflow)?;
        Ok(Self {
            owner,
            spender,
            value,
            nonce,
            deadline,
        })
    }

    pub fn struct_hash(&self) -> [u8; 32] {
        let mut encoded = Vec::with_capacity(32 * 6);
        encoded.extend_from_slice(&keccak256(PERMIT_TYPE.as_bytes()));
        encoded.extend_from_slice(&self.owner.to_word());
        encoded.extend_from_slice(&self.spender.to_word());
        encoded.extend_from_slice(&uint_word(self.value));
        encoded.extend_from_slice(&uint_word(self.nonce));
        encoded.extend_from_slice(&uint_word(self.deadline as u128));
        keccak256(&encoded)
    }

    /// The 32-byte hash the wallet signs: `keccak256(0x1901 ‖ domain ‖ struct)`.
    pub fn eip712_digest(&self, domain: &PermitDomain) -> [u8; 32] {
        let mut encoded = Vec::with_capacity(2 + 64);
        encoded.extend_from_slice(&[0x19, 0x01]);
        encoded.extend_from_slice(&domain.separator());
        encoded.extend_from_slice(&self.struct_hash());
        keccak256(&encoded)
    }

    /// `eth_signTypedData_v4` payload. Integers are sent as decimal strings.
    pub fn typed_data(&self, domain: &PermitDomain) -> Value {
        json!({
            "types": {
                "EIP712Domain": [
                    { "name": "name", "type": "string" },
                    { "name": "version", "type": "string" },
                    { "name": "chainId", "type": "uint256" },
                    { "name": "verifyingContract", "type": "address" },
                ],
                "Permit": [
                    { "name": "owner", "type": "address" },
                    { "name": "spender", "type": "address" },
                    { "name": "value", "type": "uint256" },
                    { "name": "nonce", "type": "uint256" },
                    { "name": "deadline", "type": "uint256" },
                ],
            },
            "primaryType": "Permit",
            "domain": domain,
            "message": {
                "owner": self.owner,
                "spender": self.spender,
                "value": self.value.to_string(),
                "nonce": self.nonce.to_string(),
                "deadline": self.deadline.to_string(),
            },
        })
    }
}

/// A 65-byte `r ‖ s ‖ v` signature, split for the contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermitSignature {
    pub v: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl PermitSignature {
    /// Splits a raw signature. Wallets that report the recovery id as 0/1
    /// are normalised to 27/28.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        require!(bytes.len() == 65, StakingError::InvalidSignature);
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        let mut v = bytes[64];
        if v < 27 {
            v += 27;
        }
        Ok(Self { v, r, s })
    }

    /// Parses the `0x`-prefixed hex string most wallets return.
    pub fn from_hex(signature: &str) -> Result<Self> {
        let digits = signature.strip_prefix("0x").unwrap_or(signature);
        let bytes = hex::decode(digits).map_err(|_| StakingError::InvalidSignature)?;
        Self::from_bytes(&bytes)
    }
}

/// Arguments of `stakeWithPermit(amount, duration, deadline, v, r, s)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeWithPermitArgs {
    pub amount: u128,
    pub duration: u32,
    pub deadline: u32,
    pub v: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl StakeWithPermitArgs {
    pub fn new(permit: &PermitMessage, duration: u32, signature: &PermitSignature) -> Self {
        Self {
            amount: permit.value,
            duration,
            deadline: permit.deadline,
            v: signature.v,
            r: signature.r,
            s: signature.s,
        }
    }
}
