//! The seam between the workflow and the chain.
//!
//! Everything the bind workflow needs from a node goes through
//! [`ChainGateway`]. Production code uses [`BlockchainClient`]; tests plug in
//! a scripted in-memory chain.
//!
//! [`BlockchainClient`]: crate::blockchain::client::BlockchainClient

use alloy::primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;

use crate::blockchain::types::{BlockchainResult, ChainId, ReceiptSummary, SignedTransaction};

/// Read and write access to a single chain.
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Chain ID reported by the node.
    async fn chain_id(&self) -> BlockchainResult<ChainId>;

    /// Broadcast a signed transaction and return its hash.
    async fn submit(&self, tx: &SignedTransaction) -> BlockchainResult<TxHash>;

    /// Fetch the receipt of a transaction, `None` while it is still pending.
    async fn receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<ReceiptSummary>>;

    /// Execute a read-only contract call against the latest block.
    async fn call(&self, to: Address, data: Bytes) -> BlockchainResult<Bytes>;

    /// Native balance of an account.
    async fn balance(&self, address: Address) -> BlockchainResult<U256>;

    /// Next nonce for an account, counting pending transactions.
    async fn pending_nonce(&self, address: Address) -> BlockchainResult<u64>;

    /// Current gas price in wei.
    async fn gas_price(&self) -> BlockchainResult<u128>;

    /// Gas estimate for a call or deployment (`to == None`).
    async fn estimate_gas(
        &self,
        from: Address,
        to: Option<Address>,
        value: U256,
        input: &Bytes,
    ) -> BlockchainResult<u64>;
}
