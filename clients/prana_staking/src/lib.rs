//! # PRANA Staking Client
//!
//! Client-side logic for the PRANA time-locked staking contracts on
//! Polygon. Stakes lock PRANA for one of six fixed durations at a
//! duration-dependent APR:
//!
//! - **1 / 7 / 30 Days**: short locks
//! - **90 / 180 / 365 Days**: long locks, higher APR
//!
//! ## Features
//! - Linear interest projection per second, in 18-decimal fixed point
//! - Stake with an EIP-2612 permit instead of a separate approval
//! - Claim interest without unstaking
//! - Unstake at maturity, or early with a 10% penalty after confirmation
//! - Live per-stake figures driven by a cancellable 1 s reference clock
//! - Safe math with overflow protection
//!
//! ## Collaborators
//! The wallet and the RPC endpoint are supplied by the caller through the
//! traits in [`provider`].

pub mod actions;
pub mod address;
pub mod config;
pub mod constants;
pub mod error;
pub mod interest;
pub mod permit;
pub mod provider;
pub mod state;
pub mod units;
pub mod view;

pub use actions::{ActionKind, StakeActions, StakeFlow};
pub use address::Address;
pub use config::DeploymentConfig;
pub use error::{ClientError, ProviderError, StakingError};
pub use interest::{calculate_accrued_interest, calculate_guaranteed_interest_at_maturity};
pub use state::{AprSchedule, Stake, StakeDraft, StakeSnapshot};
