//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! keystore dir / Ledger
//!     → keystore.rs, wallet.rs (operating account, signing)
//! contracts.rs (ABI encoding)
//!     → transaction.rs (nonce, gas, sign, broadcast)
//!     → client.rs (JSON-RPC with timeouts and failover)
//!     → confirmation.rs (poll receipt until settled or deadline)
//! ```
//!
//! # Security Constraints
//! - Keys never leave the wallet and are never logged
//! - All RPC calls have configurable timeouts
//! - The workflow depends on the `ChainGateway` and `TransactionSigner`
//!   traits only, never on a concrete provider or key backend

pub mod client;
pub mod confirmation;
pub mod contracts;
pub mod gateway;
pub mod keystore;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use confirmation::{ConfirmationWaiter, PollStrategy};
pub use gateway::ChainGateway;
pub use transaction::{CallSpec, PendingTransaction, TxBuilder};
pub use types::{
    BlockchainError, BlockchainResult, ChainId, ReceiptSummary, SignedTransaction,
    TransactionOutcome, TxDraft,
};
pub use wallet::{SignerKind, TransactionSigner, Wallet};
