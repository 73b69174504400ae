//! Stake with permit.
//!
//! Staking is a two-step flow. The user first signs an EIP-2612 permit for
//! the amount, which authorizes the staking contract to pull the tokens;
//! the signed arguments are then submitted with `stakeWithPermit`. The
//! permit is kept between the two steps and cleared once the stake lands.

use std::{sync::Arc, time::Instant};

use anchor_lang::Result;
use log::{debug, info, warn};

use crate::address::Address;
use crate::config::DeploymentConfig;
use crate::constants::{DurationOption, FALLBACK_MIN_STAKE_TOKENS};
use crate::error::{ClientError, ProviderError, StakingError};
use crate::interest::projected_interest;
use crate::permit::{PermitMessage, PermitSignature, StakeWithPermitArgs};
use crate::provider::{PermitSigner, StakingReader, StakingWriter, TxHash};
use crate::state::{AprSchedule, StakeDraft};
use crate::units::{format_units, parse_units};
use crate::view::StatusBanner;

/// A signed permit waiting to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingStake {
    pub permit: PermitMessage,
    pub signature: PermitSignature,
    pub args: StakeWithPermitArgs,
}

/// What the form shows before anything is signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakePreview {
    pub amount: u128,
    pub duration_seconds: u32,
    pub apr: u8,
    pub interest_at_maturity: u128,
}

/// State of the stake form: the pending permit, the loading flag and the
/// status banner.
pub struct StakeFlow {
    reader: Arc<dyn StakingReader>,
    writer: Arc<dyn StakingWriter>,
    signer: Arc<dyn PermitSigner>,
    config: DeploymentConfig,
    pending: Option<PendingStake>,
    loading: bool,
    pub banner: StatusBanner,
}

impl StakeFlow {
    pub fn new(
        reader: Arc<dyn StakingReader>,
        writer: Arc<dyn StakingWriter>,
        signer: Arc<dyn PermitSigner>,
        config: DeploymentConfig,
    ) -> Self {
        let banner = StatusBanner::new(config.message_reset());
        Self {
            reader,
            writer,
            signer,
            config,
            pending: None,
            loading: false,
            banner,
        }
    }

    pub fn pending(&self) -> Option<&PendingStake> {
        self.pending.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Projected interest for the values currently in the form.
    pub fn preview(
        amount_text: &str,
        duration_index: usize,
        schedule: &AprSchedule,
    ) -> Result<StakePreview> {
        let draft = StakeDraft::from_form(amount_text, duration_index, schedule)?;
        let interest_at_maturity =
            projected_interest(draft.amount, draft.apr, draft.duration.seconds)?;
        Ok(StakePreview {
            amount: draft.amount,
            duration_seconds: draft.duration.seconds,
            apr: draft.apr,
            interest_at_maturity,
        })
    }

    /// Validates the form, asks the wallet to sign a permit for the amount
    /// and keeps the resulting `stakeWithPermit` arguments.
    ///
    /// `now` is the unix time the permit deadline is counted from. While a
    /// signed permit is pending the form is locked: call [`StakeFlow::reset`]
    /// before signing for a different amount or duration.
    pub async fn sign_permit(
        &mut self,
        owner: &Address,
        amount_text: &str,
        duration_index: usize,
        now: u32,
        at: Instant,
    ) -> std::result::Result<&PendingStake, ClientError> {
        if self.pending.is_some() {
            let err = ClientError::from(StakingError::PermitAlreadySigned);
            self.banner.set_error(err.to_string(), at);
            return Err(err);
        }

        let decimals = self.config.token_decimals;

        let amount = match parse_units(amount_text, decimals) {
            Ok(amount) if amount > 0 => amount,
            _ => {
                self.banner.set_error("Please enter a valid amount", at);
                return Err(StakingError::InvalidAmount.into());
            }
        };

        let min_stake = match self.min_stake().await {
            Ok(min_stake) => min_stake,
            Err(err) => {
                self.banner.set_error(err.to_string(), at);
                return Err(err);
            }
        };
        if amount < min_stake {
            self.banner.set_error(
                format!(
                    "Minimum stake amount is {} {}",
                    format_units(min_stake, decimals),
                    self.config.token_symbol
                ),
                at,
            );
            return Err(StakingError::BelowMinimumStake.into());
        }

        let Some(duration) = DurationOption::at(duration_index) else {
            self.banner.set_error("Invalid staking duration", at);
            return Err(StakingError::InvalidDuration.into());
        };

        self.loading = true;
        self.banner.clear();
        let signed = self.request_signature(owner, amount, duration, now).await;
        self.loading = false;

        match signed {
            Ok(pending) => {
                debug!(
                    "permit signed for {} {} over {}, deadline {}",
                    format_units(amount, decimals),
                    self.config.token_symbol,
                    duration.label,
                    pending.permit.deadline
                );
                self.banner
                    .set_success("Permit signed successfully! You can now Stake!", at);
                Ok(&*self.pending.insert(pending))
            }
            Err(err) => {
                warn!("permit signing failed: {}", err);
                self.banner.set_error(sign_failure_message(&err), at);
                Err(err)
            }
        }
    }

    /// Submits the signed permit with `stakeWithPermit`.
    pub async fn stake(&mut self, at: Instant) -> std::result::Result<TxHash, ClientError> {
        let Some(args) = self.pending.as_ref().map(|pending| pending.args) else {
            self.banner.set_error("Please sign the permit first", at);
            return Err(StakingError::PermitNotSigned.into());
        };

        self.loading = true;
        self.banner.clear_error();
        let result = self.writer.stake_with_permit(&args).await;
        self.loading = false;

        match result {
            Ok(tx_hash) => {
                info!(
                    "staked {} for {} seconds: {}",
                    format_units(args.amount, self.config.token_decimals),
                    args.duration,
                    tx_hash
                );
                self.banner
                    .set_success(format!("Staking successful! Transaction: {tx_hash}"), at);
                self.pending = None;
                Ok(tx_hash)
            }
            Err(err) => {
                let message = stake_failure_message(&err);
                warn!("stake failed: {} ({})", message, err);
                self.banner.set_error(message, at);
                Err(err.into())
            }
        }
    }

    /// Drops a signed permit without submitting it.
    pub fn reset(&mut self) {
        self.pending = None;
        self.banner.clear();
    }

    /// `MIN_STAKE()`, or the fallback amount in token units when the read
    /// fails. The fallback must fit in `u128` at the configured decimals.
    async fn min_stake(&self) -> std::result::Result<u128, ClientError> {
        match self.reader.min_stake().await {
            Ok(min_stake) => Ok(min_stake),
            Err(err) => {
                let fallback = 10u128
                    .checked_pow(self.config.token_decimals as u32)
                    .and_then(|unit| unit.checked_mul(FALLBACK_MIN_STAKE_TOKENS))
                    .ok_or(StakingError::MathOverflow)?;
                warn!("MIN_STAKE read failed, using {}: {}", fallback, err);
                Ok(fallback)
            }
        }
    }

    async fn request_signature(
        &self,
        owner: &Address,
        amount: u128,
        duration: &DurationOption,
        now: u32,
    ) -> std::result::Result<PendingStake, ClientError> {
        let nonce = self.reader.token_nonces(owner).await?;
        debug!("permit nonce for {}: {}", owner, nonce);

        let permit = PermitMessage::new(*owner, self.config.staking_address, amount, nonce, now)?;
        let domain = self.config.permit_domain();
        let signature = self.signer.sign_permit(&domain, &permit).await?;
        let signature = PermitSignature::from_hex(&signature)?;
        let args = StakeWithPermitArgs::new(&permit, duration.seconds, &signature);

        Ok(PendingStake {
            permit,
            signature,
            args,
        })
    }
}

/// Banner text for a failed permit request.
pub fn sign_failure_message(err: &ClientError) -> String {
    match err {
        ClientError::Provider(err) if err.is_user_rejection() => {
            "Signature request was rejected".to_string()
        }
        ClientError::Provider(err) => format!("Failed to sign permit: {}", err.message()),
        err => format!("Failed to sign permit: {err}"),
    }
}

/// Banner text for a failed `stakeWithPermit`.
pub fn stake_failure_message(err: &ProviderError) -> String {
    let message = err.message();
    if let Some(reason) = err.revert_reason() {
        if reason.is_empty() {
            "Transaction reverted".to_string()
        } else {
            format!("Contract error: {reason}")
        }
    } else if message.contains("rejected") {
        "Transaction rejected by wallet".to_string()
    } else if message.contains("insufficient funds") {
        "Insufficient funds for transaction".to_string()
    } else if message.contains("extra fees") {
        "Wallet rejected the transaction due to excessive fees. Try again.".to_string()
    } else {
        "Failed to stake".to_string()
    }
}
