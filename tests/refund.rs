//! Leftover balance refund.

use alloy::primitives::U256;

use token_bind_tool::bind::{refund_rest_balance, RefundOutcome, SkipReason, Step, WorkflowError};
use token_bind_tool::blockchain::BlockchainError;

mod common;
use common::{Call, MockChain, CUSTODY, GWEI};

#[tokio::test(start_paused = true)]
async fn test_dust_is_left_alone() {
    let balance = U256::from(50_000_000_000_000u64); // 0.00005 BNB
    let chain = MockChain::new().with_balance(balance);
    let signer = common::operator();

    let outcome = refund_rest_balance(&chain, &signer, &common::settings(), CUSTODY)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RefundOutcome::Skipped {
            balance,
            reason: SkipReason::BelowDustThreshold,
        }
    );
    assert!(chain.submitted().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_balance_that_cannot_pay_gas_is_left_alone() {
    // 21000 gas at 10 gwei costs 0.00021 BNB.
    let balance = U256::from(200_000_000_000_000u64);
    let chain = MockChain::new().with_balance(balance);
    let signer = common::operator();

    let outcome = refund_rest_balance(&chain, &signer, &common::settings(), CUSTODY)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RefundOutcome::Skipped {
            balance,
            reason: SkipReason::BalanceBelowGasCost,
        }
    );
    assert!(chain.submitted().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_refund_sends_balance_minus_gas() {
    let balance = U256::from(10u64.pow(18));
    let chain = MockChain::new().with_balance(balance);
    let signer = common::operator();

    let outcome = refund_rest_balance(&chain, &signer, &common::settings(), CUSTODY)
        .await
        .unwrap();

    let gas_cost = U256::from(21_000u128 * 10 * GWEI);
    let expected = balance - gas_cost;
    let submitted = chain.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(
        outcome,
        RefundOutcome::Sent {
            amount: expected,
            gas_cost,
            tx_hash: submitted[0].hash,
        }
    );
    assert_eq!(
        chain.calls(),
        vec![Call::Transfer {
            to: CUSTODY,
            value: expected,
        }]
    );
    assert_eq!(submitted[0].draft.gas_limit, 21_000);
    assert_eq!(submitted[0].draft.gas_price, 10 * GWEI);
}

#[tokio::test(start_paused = true)]
async fn test_gas_price_ceiling_blocks_refund() {
    let chain = MockChain::new().with_gas_price(500 * GWEI);
    let signer = common::operator();

    let err = refund_rest_balance(&chain, &signer, &common::settings(), CUSTODY)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::Submission {
            step: Step::Refund,
            source: BlockchainError::GasPriceTooHigh { .. },
        }
    ));
    assert!(chain.submitted().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_gas_ceiling_checks_the_multiplied_price() {
    let chain = MockChain::new().with_gas_price(90 * GWEI);
    let signer = common::operator();
    let mut settings = common::settings();
    settings.network.gas_price_multiplier = 1.5;
    settings.network.max_gas_price_gwei = 100;

    let err = refund_rest_balance(&chain, &signer, &settings, CUSTODY)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::Submission {
            step: Step::Refund,
            source: BlockchainError::GasPriceTooHigh {
                current_gwei: 135,
                max_gwei: 100
            },
        }
    ));
    assert!(chain.submitted().is_empty());
}
