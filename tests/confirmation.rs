//! Receipt polling strategies.

use alloy::primitives::U256;
use alloy::sol_types::SolCall;
use std::time::Duration;
use tokio::time::Instant;

use token_bind_tool::bind::Step;
use token_bind_tool::blockchain::contracts::{self, IBEP20, TOKEN_MANAGER};
use token_bind_tool::blockchain::{
    CallSpec, ConfirmationWaiter, PendingTransaction, PollStrategy, TransactionOutcome, TxBuilder,
    Wallet,
};

mod common;
use common::{MockChain, TOKEN};

fn backoff(deadline_secs: u64) -> PollStrategy {
    PollStrategy::Backoff {
        initial: Duration::from_secs(1),
        max: Duration::from_secs(8),
        deadline: Duration::from_secs(deadline_secs),
    }
}

async fn submit_approve(chain: &MockChain, signer: &Wallet) -> PendingTransaction {
    let settings = common::settings();
    TxBuilder::new(chain, signer, &settings.network)
        .send(
            Step::Approve,
            CallSpec::call(TOKEN, contracts::approve_calldata(TOKEN_MANAGER, U256::from(1u64))),
        )
        .await
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_backoff_waits_for_receipt() {
    let chain = MockChain::new().pending_for(3);
    let signer = common::operator();
    let pending = submit_approve(&chain, &signer).await;
    let hash = pending.hash;

    let started = Instant::now();
    let outcome = ConfirmationWaiter::new(&chain, backoff(120))
        .wait(pending)
        .await
        .unwrap();
    let waited = started.elapsed();

    assert!(outcome.is_success());
    assert_eq!(outcome.receipt().unwrap().tx_hash, hash);
    assert_eq!(chain.receipt_queries(), 4);
    // 1s + 2s + 4s + 8s, each with up to 10% jitter.
    assert!(waited >= Duration::from_secs(15), "{waited:?}");
    assert!(waited < Duration::from_millis(16_600), "{waited:?}");
}

#[tokio::test(start_paused = true)]
async fn test_backoff_gives_up_at_deadline() {
    let chain = MockChain::new().never_mined();
    let signer = common::operator();
    let pending = submit_approve(&chain, &signer).await;

    let started = Instant::now();
    let outcome = ConfirmationWaiter::new(&chain, backoff(10))
        .wait(pending)
        .await
        .unwrap();

    assert_eq!(outcome, TransactionOutcome::Timeout);
    assert!(started.elapsed() >= Duration::from_secs(10));
    assert!(started.elapsed() < Duration::from_secs(11));
}

#[tokio::test(start_paused = true)]
async fn test_backoff_rides_out_rpc_errors() {
    let chain = MockChain::new().receipt_errors(2);
    let signer = common::operator();
    let pending = submit_approve(&chain, &signer).await;

    let outcome = ConfirmationWaiter::new(&chain, backoff(120))
        .wait(pending)
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(chain.receipt_queries(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_reverted_receipt_is_failure() {
    let chain = MockChain::new().reverting(IBEP20::approveCall::SELECTOR);
    let signer = common::operator();
    let pending = submit_approve(&chain, &signer).await;

    let outcome = ConfirmationWaiter::new(&chain, backoff(120))
        .wait(pending)
        .await
        .unwrap();

    assert!(matches!(outcome, TransactionOutcome::Failure(ref r) if !r.status));
}

#[tokio::test(start_paused = true)]
async fn test_fixed_delay_queries_once() {
    let chain = MockChain::new().pending_for(1);
    let signer = common::operator();
    let pending = submit_approve(&chain, &signer).await;

    let started = Instant::now();
    let outcome = ConfirmationWaiter::new(&chain, PollStrategy::FixedDelay(Duration::from_secs(10)))
        .wait(pending)
        .await
        .unwrap();

    assert_eq!(outcome, TransactionOutcome::Timeout);
    assert_eq!(chain.receipt_queries(), 1);
    assert!(started.elapsed() >= Duration::from_secs(10));
    assert!(started.elapsed() < Duration::from_millis(10_100));
}

#[tokio::test(start_paused = true)]
async fn test_fixed_delay_reports_mined_receipt() {
    let chain = MockChain::new();
    let signer = common::operator();
    let pending = submit_approve(&chain, &signer).await;

    let outcome = ConfirmationWaiter::new(&chain, PollStrategy::FixedDelay(Duration::from_secs(10)))
        .wait(pending)
        .await
        .unwrap();

    assert!(outcome.is_success());
}

#[tokio::test(start_paused = true)]
async fn test_fixed_delay_surfaces_rpc_error() {
    let chain = MockChain::new().receipt_errors(1);
    let signer = common::operator();
    let pending = submit_approve(&chain, &signer).await;

    let result = ConfirmationWaiter::new(&chain, PollStrategy::FixedDelay(Duration::from_secs(10)))
        .wait(pending)
        .await;

    assert!(result.is_err());
}
