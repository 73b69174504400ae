//! Permit-then-stake flow against an in-memory chain.

mod common;

use std::{sync::Arc, time::Instant};

use assert_matches::assert_matches;
use common::{init_logger, owner, Call, MockChain, ONE_TOKEN, T, TX_HASH};
use prana_staking::{
    error::ProviderError, ClientError, DeploymentConfig, StakeFlow, StakingError,
};

fn flow(chain: &Arc<MockChain>) -> StakeFlow {
    StakeFlow::new(
        chain.clone(),
        chain.clone(),
        chain.clone(),
        DeploymentConfig::default(),
    )
}

// ═══════════════════════════════════════════════════════════════════════════
//  1. Happy path
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_sign_then_stake() {
    init_logger();
    let chain = MockChain::default().shared();
    let mut flow = flow(&chain);
    let config = DeploymentConfig::default();
    let at = Instant::now();

    let pending = flow.sign_permit(&owner(), "150", 2, T, at).await.unwrap().clone();
    assert_eq!(pending.permit.owner, owner());
    assert_eq!(pending.permit.spender, config.staking_address);
    assert_eq!(pending.permit.value, 150 * ONE_TOKEN);
    assert_eq!(pending.permit.nonce, 3);
    assert_eq!(pending.permit.deadline, T + 3_600);
    assert_eq!(pending.args.amount, 150 * ONE_TOKEN);
    assert_eq!(pending.args.duration, 2_592_000);
    assert_eq!(pending.args.deadline, T + 3_600);
    assert_eq!(pending.args.v, 27);
    assert_eq!(pending.args.r, [0x01; 32]);
    assert_eq!(pending.args.s, [0x02; 32]);
    assert_eq!(
        flow.banner.success(),
        Some("Permit signed successfully! You can now Stake!")
    );
    assert!(!flow.is_loading());

    assert_matches!(
        chain.calls().as_slice(),
        [Call::SignPermit(domain, _)] if domain.name == "Prana_v2" && domain.chain_id == 137
    );

    let tx_hash = flow.stake(at).await.unwrap();
    assert_eq!(tx_hash, TX_HASH);
    assert_eq!(
        flow.banner.success().map(str::to_string),
        Some(format!("Staking successful! Transaction: {TX_HASH}"))
    );
    assert!(flow.pending().is_none());
    assert_eq!(chain.calls()[1], Call::StakeWithPermit(pending.args));
}

// ═══════════════════════════════════════════════════════════════════════════
//  2. Form validation
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_invalid_amount_sends_nothing() {
    let chain = MockChain::default().shared();
    let mut flow = flow(&chain);

    for text in ["", "0", "abc", "-5", "1.0000000001"] {
        let err = flow
            .sign_permit(&owner(), text, 2, T, Instant::now())
            .await
            .unwrap_err();
        assert!(err.is(StakingError::InvalidAmount), "{text}");
        assert_eq!(flow.banner.error(), Some("Please enter a valid amount"));
    }
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn test_below_minimum_stake() {
    let chain = MockChain::default().shared();
    let mut flow = flow(&chain);

    let err = flow
        .sign_permit(&owner(), "99.5", 2, T, Instant::now())
        .await
        .unwrap_err();
    assert_matches!(err, ClientError::Staking(_));
    assert!(err.is(StakingError::BelowMinimumStake));
    assert_eq!(flow.banner.error(), Some("Minimum stake amount is 100 PRANA"));
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn test_min_stake_read_failure_uses_fallback() {
    let chain = MockChain {
        min_stake: Err(ProviderError::Rpc("header not found".into())),
        ..MockChain::default()
    }
    .shared();
    let mut flow = flow(&chain);

    let err = flow
        .sign_permit(&owner(), "50", 2, T, Instant::now())
        .await
        .unwrap_err();
    assert!(err.is(StakingError::BelowMinimumStake));

    assert!(flow
        .sign_permit(&owner(), "100", 2, T, Instant::now())
        .await
        .is_ok());
}

#[tokio::test]
async fn test_unknown_duration_index() {
    let chain = MockChain::default().shared();
    let mut flow = flow(&chain);

    let err = flow
        .sign_permit(&owner(), "150", 6, T, Instant::now())
        .await
        .unwrap_err();
    assert!(err.is(StakingError::InvalidDuration));
    assert!(chain.calls().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
//  3. Wallet and contract failures
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_signature_rejected() {
    let chain = MockChain::default().shared();
    chain.fail_with(ProviderError::Wallet(
        "User rejected the request.".into(),
    ));
    let mut flow = flow(&chain);

    let err = flow
        .sign_permit(&owner(), "150", 2, T, Instant::now())
        .await
        .unwrap_err();
    assert_matches!(err, ClientError::Provider(ProviderError::Wallet(_)));
    assert_eq!(flow.banner.error(), Some("Signature request was rejected"));
    assert!(flow.pending().is_none());
}

#[tokio::test]
async fn test_signer_failure_is_passed_through() {
    let chain = MockChain::default().shared();
    chain.fail_with(ProviderError::Wallet("Ledger device locked".into()));
    let mut flow = flow(&chain);

    assert!(flow
        .sign_permit(&owner(), "150", 2, T, Instant::now())
        .await
        .is_err());
    assert_eq!(
        flow.banner.error(),
        Some("Failed to sign permit: Ledger device locked")
    );
}

#[tokio::test]
async fn test_stake_requires_permit() {
    let chain = MockChain::default().shared();
    let mut flow = flow(&chain);

    let err = flow.stake(Instant::now()).await.unwrap_err();
    assert!(err.is(StakingError::PermitNotSigned));
    assert_eq!(flow.banner.error(), Some("Please sign the permit first"));
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn test_reverted_stake_keeps_permit() {
    let chain = MockChain::default().shared();
    let mut flow = flow(&chain);
    flow.sign_permit(&owner(), "150", 2, T, Instant::now())
        .await
        .unwrap();

    chain.fail_with(ProviderError::Rpc(
        "execution reverted: Permit expired".into(),
    ));
    let err = flow.stake(Instant::now()).await.unwrap_err();
    assert_matches!(err, ClientError::Provider(ProviderError::Rpc(_)));
    assert_eq!(flow.banner.error(), Some("Contract error: Permit expired"));
    assert!(flow.pending().is_some());
}

#[tokio::test]
async fn test_banner_clears_after_reset_period() {
    let chain = MockChain::default().shared();
    let mut flow = flow(&chain);
    let at = Instant::now();

    let _ = flow.stake(at).await;
    assert!(flow.banner.error().is_some());
    assert!(!flow.banner.expire(at + std::time::Duration::from_secs(9)));
    assert!(flow.banner.expire(at + std::time::Duration::from_secs(10)));
    assert_eq!(flow.banner.error(), None);
}

#[tokio::test]
async fn test_fallback_min_stake_overflow_is_an_error() {
    let chain = MockChain {
        min_stake: Err(ProviderError::Rpc("header not found".into())),
        ..MockChain::default()
    }
    .shared();
    let config = DeploymentConfig::from_json(r#"{"tokenDecimals": 38}"#).unwrap();
    let mut flow = StakeFlow::new(chain.clone(), chain.clone(), chain.clone(), config);

    let err = flow
        .sign_permit(&owner(), "1", 2, T, Instant::now())
        .await
        .unwrap_err();
    assert!(err.is(StakingError::MathOverflow));
    assert_eq!(
        flow.banner.error(),
        Some("Arithmetic overflow occurred during calculation")
    );
    assert!(chain.calls().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
//  4. Pending permit
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_pending_permit_locks_the_form_until_reset() {
    let chain = MockChain::default().shared();
    let mut flow = flow(&chain);
    let first = flow
        .sign_permit(&owner(), "150", 2, T, Instant::now())
        .await
        .unwrap()
        .clone();

    let err = flow
        .sign_permit(&owner(), "500", 5, T, Instant::now())
        .await
        .unwrap_err();
    assert!(err.is(StakingError::PermitAlreadySigned));
    assert_eq!(
        flow.banner.error(),
        Some("Permit already signed. Stake it or reset the form first")
    );
    assert_eq!(flow.pending(), Some(&first));
    assert_eq!(chain.calls().len(), 1);

    flow.reset();
    let second = flow
        .sign_permit(&owner(), "500", 5, T, Instant::now())
        .await
        .unwrap();
    assert_eq!(second.args.amount, 500 * ONE_TOKEN);
    assert_eq!(second.args.duration, 31_536_000);
}
