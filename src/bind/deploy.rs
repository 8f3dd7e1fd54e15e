//! Token contract deployment.

use alloy::primitives::{Address, TxHash};

use crate::bind::error::WorkflowError;
use crate::bind::request::BindRequest;
use crate::bind::settings::WorkflowSettings;
use crate::bind::state::Step;
use crate::bind::steps;
use crate::blockchain::{CallSpec, ChainGateway, ConfirmationWaiter, TransactionSigner, TxBuilder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub contract: Address,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Deploy the request's bytecode from the operating account and wait for
/// the created address.
pub async fn deploy_contract<G, S>(
    gateway: &G,
    signer: &S,
    settings: &WorkflowSettings,
    request: &BindRequest,
) -> Result<Deployment, WorkflowError>
where
    G: ChainGateway + ?Sized,
    S: TransactionSigner + ?Sized,
{
    let builder = TxBuilder::new(gateway, signer, &settings.network);
    let waiter = ConfirmationWaiter::from_config(gateway, &settings.confirmation);

    tracing::info!(
        symbol = %request.symbol,
        from = %builder.address(),
        bytecode_len = request.bytecode.len(),
        "Deploying token contract"
    );
    let pending = steps::send(&builder, Step::Deploy, CallSpec::deploy(request.bytecode.clone())).await?;
    let record = steps::settle_success(&waiter, pending).await?;

    let receipt = record.outcome.receipt();
    let contract = receipt
        .and_then(|r| r.contract_address)
        .ok_or(WorkflowError::MissingContractAddress { tx_hash: record.hash })?;

    tracing::info!(%contract, tx_hash = %record.hash, "Token contract deployed");
    Ok(Deployment {
        contract,
        tx_hash: record.hash,
        block_number: receipt.and_then(|r| r.block_number),
    })
}
