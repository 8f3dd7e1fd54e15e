//! Sweep the operating account's leftover native balance to custody.

use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, Bytes, TxHash, U256};

use crate::bind::error::WorkflowError;
use crate::bind::settings::WorkflowSettings;
use crate::bind::state::Step;
use crate::bind::steps;
use crate::blockchain::transaction::TRANSFER_GAS;
use crate::blockchain::{CallSpec, ChainGateway, ConfirmationWaiter, TransactionSigner, TxBuilder};

/// Why a refund did not send anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    BelowDustThreshold,
    BalanceBelowGasCost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefundOutcome {
    Skipped { balance: U256, reason: SkipReason },
    Sent {
        amount: U256,
        gas_cost: U256,
        tx_hash: TxHash,
    },
}

/// Transfer `balance - gas cost` from the operating account to `custody`.
///
/// Nothing is submitted when the balance is under the dust threshold or
/// cannot pay for its own transfer.
pub async fn refund_rest_balance<G, S>(
    gateway: &G,
    signer: &S,
    settings: &WorkflowSettings,
    custody: Address,
) -> Result<RefundOutcome, WorkflowError>
where
    G: ChainGateway + ?Sized,
    S: TransactionSigner + ?Sized,
{
    let builder = TxBuilder::new(gateway, signer, &settings.network);
    let from = builder.address();

    let balance = gateway.balance(from).await?;
    tracing::info!(%from, balance = %format_ether(balance), "Operating account balance");

    if balance < settings.dust_threshold {
        tracing::info!(
            threshold = %format_ether(settings.dust_threshold),
            "Balance below dust threshold, nothing to refund"
        );
        return Ok(RefundOutcome::Skipped {
            balance,
            reason: SkipReason::BelowDustThreshold,
        });
    }

    let gas_price = builder
        .gas_price()
        .await
        .map_err(WorkflowError::submission(Step::Refund))?;
    let gas_cost = U256::from(gas_price) * U256::from(TRANSFER_GAS);
    if balance <= gas_cost {
        tracing::info!(gas_cost = %format_ether(gas_cost), "Balance cannot cover transfer gas");
        return Ok(RefundOutcome::Skipped {
            balance,
            reason: SkipReason::BalanceBelowGasCost,
        });
    }
    let amount = balance - gas_cost;

    let spec = CallSpec {
        to: Some(custody),
        value: amount,
        input: Bytes::new(),
        gas_limit: Some(TRANSFER_GAS),
        gas_price: Some(gas_price),
    };
    let draft = builder
        .draft(spec)
        .await
        .map_err(WorkflowError::submission(Step::Refund))?;
    tracing::info!(%custody, amount = %format_ether(amount), "Refunding rest balance");
    let pending = steps::send_draft(&builder, Step::Refund, draft).await?;

    let waiter = ConfirmationWaiter::from_config(gateway, &settings.confirmation);
    let record = steps::settle_success(&waiter, pending).await?;

    Ok(RefundOutcome::Sent {
        amount,
        gas_cost,
        tx_hash: record.hash,
    })
}
