//! Error types for the PRANA staking client.
//!
//! Domain validation failures are declared with Anchor's `#[error_code]` so
//! they carry a stable number and message, and are raised with `require!`.
//! Failures reported by the wallet or the RPC endpoint are not ours to
//! interpret: they travel as [`ProviderError`] with the original message.
//!
//! ## Error Codes
//! - 6000-6006: Stake record / input validation errors
//! - 6007: Math errors
//! - 6008-6011: Permit, signature and snapshot errors

use anchor_lang::error::Error as AnchorError;
use anchor_lang::error_code;

/// Custom error codes for the staking client.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum StakingError {
    // ========== Validation Errors (6000-6006) ==========

    /// [6000] Stake record is malformed (zero amount or duration, claim before start).
    #[msg("Invalid stake record")]
    InvalidStakeRecord,

    /// [6001] Amount text is empty, non-numeric, negative or too precise.
    #[msg("Please enter a valid amount")]
    InvalidAmount,

    /// [6002] Amount is below the contract's MIN_STAKE.
    #[msg("Amount is below the minimum stake")]
    BelowMinimumStake,

    /// [6003] Duration is not one of the enumerated lock periods.
    #[msg("Invalid staking duration")]
    InvalidDuration,

    /// [6004] getAllAPRs returned arrays of different lengths.
    #[msg("APR schedule durations and rates do not line up")]
    InvalidAprSchedule,

    /// [6005] Address is not 20 bytes of hex.
    #[msg("Invalid address")]
    InvalidAddress,

    /// [6006] Configuration values are out of range.
    #[msg("Invalid deployment configuration")]
    InvalidConfig,

    // ========== Math Errors (6007) ==========

    /// [6007] Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    // ========== Permit Errors (6008-6011) ==========

    /// [6008] Stake submitted before a permit was signed.
    #[msg("Please sign the permit first")]
    PermitNotSigned,

    /// [6009] Signature is not 65 bytes of r || s || v.
    #[msg("Invalid permit signature")]
    InvalidSignature,

    /// [6010] Snapshot bytes could not be decoded.
    #[msg("Invalid stake snapshot")]
    InvalidSnapshot,

    /// [6011] A permit is already waiting to be staked; reset it to sign again.
    #[msg("Permit already signed. Stake it or reset the form first")]
    PermitAlreadySigned,
}

/// Failure reported by an external collaborator (wallet, RPC node, contract).
///
/// The message is kept verbatim; classification happens at the action layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The wallet refused or failed to sign or send.
    #[error("{0}")]
    Wallet(String),

    /// The RPC endpoint or the contract call failed.
    #[error("{0}")]
    Rpc(String),
}

impl ProviderError {
    /// The raw message as produced by the collaborator.
    pub fn message(&self) -> &str {
        match self {
            ProviderError::Wallet(message) | ProviderError::Rpc(message) => message,
        }
    }

    /// True when the user dismissed the wallet prompt.
    pub fn is_user_rejection(&self) -> bool {
        let message = self.message();
        message.contains("User rejected")
            || message.contains("User denied")
            || message.contains("cancelled")
    }

    /// Reason string of an `execution reverted: <reason>` failure.
    ///
    /// Returns `Some("")` for a revert without a reason and `None` when the
    /// failure is not a revert at all.
    pub fn revert_reason(&self) -> Option<&str> {
        const MARKER: &str = "execution reverted";
        let message = self.message();
        let start = message.find(MARKER)?;
        let rest = &message[start + MARKER.len()..];
        let Some(reason) = rest.strip_prefix(": ") else {
            return Some("");
        };
        let end = reason.find('"').unwrap_or(reason.len());
        Some(&reason[..end])
    }
}

/// Any failure surfaced by a client operation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Local validation rejected the request before anything was sent.
    #[error("{}", anchor_error_message(.0))]
    Staking(AnchorError),

    /// A collaborator failed; message passed through.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<AnchorError> for ClientError {
    fn from(err: AnchorError) -> Self {
        ClientError::Staking(err)
    }
}

impl From<StakingError> for ClientError {
    fn from(err: StakingError) -> Self {
        ClientError::Staking(err.into())
    }
}

impl ClientError {
    /// Returns true if this is the given domain error.
    pub fn is(&self, code: StakingError) -> bool {
        match self {
            ClientError::Staking(err) => *err == AnchorError::from(code),
            ClientError::Provider(_) => false,
        }
    }
}

/// Human-readable message of an Anchor error, without the debug envelope.
pub fn anchor_error_message(err: &AnchorError) -> String {
    match err {
        AnchorError::AnchorError(err) => err.error_msg.clone(),
        AnchorError::ProgramError(err) => err.program_error.to_string(),
    }
}
