//! Transaction building, signing and broadcast.
//!
//! # Responsibilities
//! - Sync the operating account's nonce from the chain before each send
//! - Price gas with the configured multiplier and ceiling
//! - Sign through the [`TransactionSigner`] and broadcast through the
//!   [`ChainGateway`]
//! - Hand back a [`PendingTransaction`] for the confirmation waiter

use alloy::primitives::{Address, Bytes, TxHash, U256};

use crate::bind::state::Step;
use crate::blockchain::gateway::ChainGateway;
use crate::blockchain::types::{BlockchainError, BlockchainResult, NetworkConfig, TxDraft};
use crate::blockchain::wallet::TransactionSigner;

/// Gas used by a plain native transfer.
pub const TRANSFER_GAS: u64 = 21_000;

const WEI_PER_GWEI: u128 = 1_000_000_000;
const BPS: u128 = 10_000;

/// Scale `node_price` by the configured multiplier and enforce the ceiling on
/// the price that will actually be signed.
fn apply_gas_policy(node_price: u128, network: &NetworkConfig) -> BlockchainResult<u128> {
    let multiplier_bps = (network.gas_price_multiplier * BPS as f64).round() as u128;
    let price = node_price.saturating_mul(multiplier_bps) / BPS;
    let ceiling = u128::from(network.max_gas_price_gwei) * WEI_PER_GWEI;
    if price > ceiling {
        return Err(BlockchainError::GasPriceTooHigh {
            current_gwei: u64::try_from(price.div_ceil(WEI_PER_GWEI)).unwrap_or(u64::MAX),
            max_gwei: network.max_gas_price_gwei,
        });
    }
    Ok(price)
}

/// A broadcast transaction that has not been confirmed yet.
///
/// Deliberately not `Clone`: the confirmation waiter takes it by value, so a
/// step cannot wait on the same submission twice.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingTransaction {
    pub step: Step,
    pub hash: TxHash,
    pub nonce: u64,
}

/// What to send; gas fields are filled in by [`TxBuilder::draft`] unless set.
#[derive(Debug, Clone, Default)]
pub struct CallSpec {
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub gas_limit: Option<u64>,
    pub gas_price: Option<u128>,
}

impl CallSpec {
    pub fn call(to: Address, input: Bytes) -> Self {
        Self {
            to: Some(to),
            input,
            ..Self::default()
        }
    }

    pub fn deploy(bytecode: Bytes) -> Self {
        Self {
            input: bytecode,
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}

/// Transaction builder for the operating account.
pub struct TxBuilder<'a, G: ?Sized, S: ?Sized> {
    gateway: &'a G,
    signer: &'a S,
    network: &'a NetworkConfig,
}

impl<'a, G, S> TxBuilder<'a, G, S>
where
    G: ChainGateway + ?Sized,
    S: TransactionSigner + ?Sized,
{
    pub fn new(gateway: &'a G, signer: &'a S, network: &'a NetworkConfig) -> Self {
        Self {
            gateway,
            signer,
            network,
        }
    }

    /// Get the operating account address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Current gas price with the safety multiplier applied.
    ///
    /// Fails when the adjusted price is above `max_gas_price_gwei`.
    pub async fn gas_price(&self) -> BlockchainResult<u128> {
        let node_price = self.gateway.gas_price().await?;
        apply_gas_policy(node_price, self.network)
    }

    /// Build an unsigned transaction with a fresh nonce.
    pub async fn draft(&self, spec: CallSpec) -> BlockchainResult<TxDraft> {
        let from = self.signer.address();

        let gas_price = match spec.gas_price {
            Some(price) => price,
            None => self.gas_price().await?,
        };
        let gas_limit = match spec.gas_limit {
            Some(limit) => limit,
            None => {
                let estimate = self
                    .gateway
                    .estimate_gas(from, spec.to, spec.value, &spec.input)
                    .await?;
                // 20% headroom over the node's estimate.
                estimate.saturating_add(estimate / 5)
            }
        };

        let chain_nonce = self.gateway.pending_nonce(from).await?;
        self.signer.sync_nonce(chain_nonce);
        let nonce = self.signer.next_nonce();

        Ok(TxDraft {
            to: spec.to,
            value: spec.value,
            input: spec.input,
            nonce,
            gas_limit,
            gas_price,
            chain_id: self.network.chain_id,
        })
    }

    /// Sign and broadcast a prepared draft.
    pub async fn submit(&self, step: Step, draft: TxDraft) -> BlockchainResult<PendingTransaction> {
        let nonce = draft.nonce;
        let signed = self.signer.sign(draft).await?;
        let hash = self.gateway.submit(&signed).await?;
        if hash != signed.hash {
            tracing::warn!(%step, expected = %signed.hash, reported = %hash, "Node reported a different transaction hash");
        }

        metrics::counter!("bind_tool_transactions_total", "step" => step.as_str()).increment(1);
        tracing::info!(%step, tx_hash = %hash, nonce, "Transaction submitted");

        Ok(PendingTransaction { step, hash, nonce })
    }

    /// Draft, sign and broadcast in one go.
    pub async fn send(&self, step: Step, spec: CallSpec) -> BlockchainResult<PendingTransaction> {
        let draft = self.draft(spec).await?;
        self.submit(step, draft).await
    }
}
