//! Submit-then-confirm plumbing shared by every operation.

use alloy::primitives::TxHash;

use crate::bind::error::WorkflowError;
use crate::bind::state::Step;
use crate::blockchain::{
    CallSpec, ChainGateway, ConfirmationWaiter, PendingTransaction, TransactionOutcome,
    TransactionSigner, TxBuilder, TxDraft,
};

/// One submitted transaction and how it settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRecord {
    pub step: Step,
    pub hash: TxHash,
    pub outcome: TransactionOutcome,
}

pub(crate) async fn send<G, S>(
    builder: &TxBuilder<'_, G, S>,
    step: Step,
    spec: CallSpec,
) -> Result<PendingTransaction, WorkflowError>
where
    G: ChainGateway + ?Sized,
    S: TransactionSigner + ?Sized,
{
    builder
        .send(step, spec)
        .await
        .map_err(WorkflowError::submission(step))
}

pub(crate) async fn send_draft<G, S>(
    builder: &TxBuilder<'_, G, S>,
    step: Step,
    draft: TxDraft,
) -> Result<PendingTransaction, WorkflowError>
where
    G: ChainGateway + ?Sized,
    S: TransactionSigner + ?Sized,
{
    builder
        .submit(step, draft)
        .await
        .map_err(WorkflowError::submission(step))
}

/// Wait for `pending` and record it; a timeout is always an error.
pub(crate) async fn settle<G>(
    waiter: &ConfirmationWaiter<'_, G>,
    pending: PendingTransaction,
) -> Result<TxRecord, WorkflowError>
where
    G: ChainGateway + ?Sized,
{
    let (step, hash) = (pending.step, pending.hash);
    let outcome = waiter.wait(pending).await?;
    if outcome == TransactionOutcome::Timeout {
        return Err(WorkflowError::ConfirmationTimeout { step, tx_hash: hash });
    }
    Ok(TxRecord {
        step,
        hash,
        outcome,
    })
}

/// Like [`settle`], but a revert is an error too.
pub(crate) async fn settle_success<G>(
    waiter: &ConfirmationWaiter<'_, G>,
    pending: PendingTransaction,
) -> Result<TxRecord, WorkflowError>
where
    G: ChainGateway + ?Sized,
{
    let record = settle(waiter, pending).await?;
    if !record.outcome.is_success() {
        return Err(WorkflowError::OnChainFailure {
            step: record.step,
            tx_hash: record.hash,
        });
    }
    Ok(record)
}
