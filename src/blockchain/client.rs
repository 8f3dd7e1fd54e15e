//! Blockchain RPC client with timeout and failover handling.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint of the selected network
//! - Query chain state (balances, nonces, receipts, contract calls)
//! - Broadcast signed transactions
//! - Handle timeouts and network errors by falling over to the next provider

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::transports::TransportResult;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::gateway::ChainGateway;
use crate::blockchain::types::{
    BlockchainError, BlockchainResult, ChainId, NetworkConfig, ReceiptSummary, SignedTransaction,
};

type DynProvider = Arc<dyn Provider + Send + Sync>;

/// Blockchain RPC client wrapper with failover support.
#[derive(Clone)]
pub struct BlockchainClient {
    /// List of providers (primary + failovers).
    providers: Vec<DynProvider>,
    /// Configuration.
    config: NetworkConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client without touching the network.
    pub fn new(config: NetworkConfig) -> BlockchainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut providers = Vec::new();

        let primary_url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        providers.push(Arc::new(ProviderBuilder::new().connect_http(primary_url)) as DynProvider);

        for url_str in &config.failover_urls {
            if let Ok(url) = url_str.parse() {
                providers.push(Arc::new(ProviderBuilder::new().connect_http(url)) as DynProvider);
            } else {
                tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL");
            }
        }

        Ok(Self {
            providers,
            config,
            timeout_duration,
        })
    }

    /// Create a client and verify the node serves the configured chain.
    pub async fn connect(config: NetworkConfig) -> BlockchainResult<Self> {
        let client = Self::new(config)?;
        client.verify_chain_id().await?;
        tracing::info!(
            rpc_url = %client.config.rpc_url,
            chain_id = client.config.chain_id,
            failovers = client.providers.len() - 1,
            "Blockchain client initialized"
        );
        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Run a read request against each provider in turn until one answers.
    async fn with_failover<T, F, Fut>(&self, op: &'static str, f: F) -> BlockchainResult<T>
    where
        F: Fn(DynProvider) -> Fut,
        Fut: Future<Output = TransportResult<T>>,
    {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, f(provider.clone())).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, op, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, op, "RPC timeout, trying next provider");
                }
            }
        }
        Err(BlockchainError::Rpc(format!("All RPC providers failed: {op}")))
    }
}

impl BlockchainClient {
    /// After an unanswered broadcast, check whether the transaction reached a
    /// node anyway before reporting `refusal`.
    async fn find_relayed(&self, tx: &SignedTransaction, refusal: String) -> BlockchainResult<TxHash> {
        let hash = tx.hash;
        let lookup = self
            .with_failover("get_transaction_by_hash", |p| async move {
                p.get_transaction_by_hash(hash).await
            })
            .await;
        match lookup {
            Ok(Some(_)) => {
                tracing::info!(tx_hash = %hash, "Transaction found on the network after failed broadcast");
                Ok(hash)
            }
            Ok(None) => Err(BlockchainError::Submission(refusal)),
            Err(e) => {
                tracing::warn!(tx_hash = %hash, error = %e, "Cannot tell whether the transaction was relayed");
                Err(BlockchainError::Submission(format!(
                    "{refusal}; transaction {hash} may still have been relayed, check it before retrying"
                )))
            }
        }
    }
}

fn is_already_known(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("already known")
        || message.contains("known transaction")
        || message.contains("already imported")
}

fn summarize(receipt: &TransactionReceipt) -> ReceiptSummary {
    ReceiptSummary {
        tx_hash: receipt.transaction_hash,
        status: receipt.status(),
        contract_address: receipt.contract_address,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
    }
}

#[async_trait]
impl ChainGateway for BlockchainClient {
    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        self.with_failover("get_chain_id", |p| async move { p.get_chain_id().await })
            .await
            .map(ChainId)
    }

    async fn submit(&self, tx: &SignedTransaction) -> BlockchainResult<TxHash> {
        // Set once a provider failed without answering; it may still have
        // relayed the transaction.
        let mut maybe_relayed = false;
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.send_raw_transaction(&tx.raw);
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(pending)) => return Ok(*pending.tx_hash()),
                Ok(Err(e)) => match e.as_error_resp() {
                    Some(resp) if maybe_relayed && is_already_known(&resp.message) => {
                        tracing::info!(provider_idx = i, tx_hash = %tx.hash, "Node already has the transaction");
                        return Ok(tx.hash);
                    }
                    Some(_) if maybe_relayed => {
                        return self.find_relayed(tx, e.to_string()).await;
                    }
                    // The node answered and refused; another node will say the same.
                    Some(_) => return Err(BlockchainError::Submission(e.to_string())),
                    None => {
                        tracing::warn!(provider_idx = i, error = %e, "Broadcast failed, trying next provider");
                        maybe_relayed = true;
                    }
                },
                Err(_) => {
                    tracing::warn!(provider_idx = i, "Broadcast timeout, trying next provider");
                    maybe_relayed = true;
                }
            }
        }
        self.find_relayed(tx, format!("no provider accepted transaction {}", tx.hash))
            .await
    }

    async fn receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<ReceiptSummary>> {
        let receipt = self
            .with_failover("get_transaction_receipt", |p| async move {
                p.get_transaction_receipt(tx_hash).await
            })
            .await?;
        Ok(receipt.as_ref().map(summarize))
    }

    async fn call(&self, to: Address, data: Bytes) -> BlockchainResult<Bytes> {
        self.with_failover("eth_call", |p| {
            let request = TransactionRequest::default()
                .with_to(to)
                .with_input(data.clone());
            async move { p.call(request).await }
        })
        .await
    }

    async fn balance(&self, address: Address) -> BlockchainResult<U256> {
        self.with_failover("get_balance", |p| async move { p.get_balance(address).await })
            .await
    }

    async fn pending_nonce(&self, address: Address) -> BlockchainResult<u64> {
        self.with_failover("get_transaction_count", |p| async move {
            p.get_transaction_count(address).pending().await
        })
        .await
    }

    async fn gas_price(&self) -> BlockchainResult<u128> {
        self.with_failover("get_gas_price", |p| async move { p.get_gas_price().await })
            .await
    }

    async fn estimate_gas(
        &self,
        from: Address,
        to: Option<Address>,
        value: U256,
        input: &Bytes,
    ) -> BlockchainResult<u64> {
        let mut request = TransactionRequest::default()
            .with_from(from)
            .with_value(value);
        request = match to {
            Some(to) => request.with_to(to).with_input(input.clone()),
            None => request.with_deploy_code(input.clone()),
        };
        self.with_failover("estimate_gas", |p| {
            let request = request.clone();
            async move { p.estimate_gas(request).await }
        })
        .await
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
