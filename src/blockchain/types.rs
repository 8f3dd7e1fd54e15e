//! Chain-specific types and error definitions.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use std::fmt;
use thiserror::Error;

// Re-export NetworkConfig from config module to avoid duplication
pub use crate::config::schema::NetworkConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The node refused the transaction before it entered the chain.
    #[error("Transaction submission rejected: {0}")]
    Submission(String),

    /// Invalid private key format, keystore or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Gas price exceeded maximum allowed.
    #[error("Gas price {current_gwei} gwei exceeds maximum {max_gwei} gwei")]
    GasPriceTooHigh { current_gwei: u64, max_gwei: u64 },

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Contract call returned data that does not match the expected ABI.
    #[error("ABI decode error in {call}: {reason}")]
    Abi { call: &'static str, reason: String },
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// A transaction the workflow wants signed. `to == None` deploys a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxDraft {
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub nonce: u64,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub chain_id: u64,
}

/// A signed, EIP-2718 encoded transaction ready for broadcast.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    pub hash: TxHash,
    pub raw: Bytes,
    pub draft: TxDraft,
}

/// The parts of a transaction receipt the tool branches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptSummary {
    pub tx_hash: TxHash,
    /// `true` when the receipt status is 1.
    pub status: bool,
    pub contract_address: Option<Address>,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// Result of waiting for a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOutcome {
    /// Mined with status 1.
    Success(ReceiptSummary),
    /// Mined with status 0.
    Failure(ReceiptSummary),
    /// No receipt was observed before the deadline.
    Timeout,
}

impl TransactionOutcome {
    pub fn from_receipt(receipt: ReceiptSummary) -> Self {
        if receipt.status {
            Self::Success(receipt)
        } else {
            Self::Failure(receipt)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn receipt(&self) -> Option<&ReceiptSummary> {
        match self {
            Self::Success(r) | Self::Failure(r) => Some(r),
            Self::Timeout => None,
        }
    }

    /// Short label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Failure(_) => "failure",
            Self::Timeout => "timeout",
        }
    }
}

impl fmt::Display for TransactionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.receipt() {
            Some(r) => write!(
                f,
                "{} (status {}, block {})",
                self.label(),
                u8::from(r.status),
                r.block_number.map(|b| b.to_string()).unwrap_or_else(|| "?".into())
            ),
            None => f.write_str(self.label()),
        }
    }
}
