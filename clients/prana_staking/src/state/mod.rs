//! State structures mirrored from the staking contract.
//!
//! This module defines the records read from the contract and the
//! client-side views built on top of them.

pub mod apr_schedule;
pub mod snapshot;
pub mod stake;

pub use apr_schedule::*;
pub use snapshot::*;
pub use stake::*;
