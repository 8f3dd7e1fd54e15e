//! Operating-account wallet and transaction signing.
//!
//! # Security
//! - Keys come from an encrypted keystore or a hardware wallet
//! - Keys are never logged or serialized
//! - The workflow only ever sees the account address

use alloy::consensus::TxEnvelope;
use alloy::eips::eip2718::Encodable2718;
use alloy::network::{Ethereum, EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::blockchain::types::{BlockchainError, BlockchainResult, SignedTransaction, TxDraft};

/// Which signing backend holds the operating key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerKind {
    Keystore,
    Ledger,
}

impl fmt::Display for SignerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keystore => f.write_str("keystore"),
            Self::Ledger => f.write_str("ledger"),
        }
    }
}

/// Capability to authorize transactions for the operating account.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Address of the operating account.
    fn address(&self) -> Address;

    /// Sign a draft and return the broadcastable encoding.
    async fn sign(&self, draft: TxDraft) -> BlockchainResult<SignedTransaction>;

    /// Record the nonce the chain expects next.
    fn sync_nonce(&self, _chain_nonce: u64) {}

    /// Hand out the nonce for the next transaction.
    fn next_nonce(&self) -> u64;
}

/// Wallet for transaction signing with nonce management.
pub struct Wallet {
    /// The underlying network wallet (keystore or ledger backed).
    inner: EthereumWallet,
    address: Address,
    kind: SignerKind,
    /// Current nonce for sequential transactions.
    nonce: Arc<AtomicU64>,
    /// Chain ID for EIP-155 replay protection.
    chain_id: u64,
}

impl Wallet {
    /// Wrap a local (keystore-decrypted) signer.
    pub fn from_local(signer: PrivateKeySigner, chain_id: u64) -> Self {
        let address = signer.address();
        tracing::info!(address = %address, chain_id, backend = "keystore", "Wallet initialized");
        Self {
            inner: EthereumWallet::new(signer),
            address,
            kind: SignerKind::Keystore,
            nonce: Arc::new(AtomicU64::new(0)),
            chain_id,
        }
    }

    /// Create a wallet from a hex-encoded private key string.
    ///
    /// The key is parsed and never logged.
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);
        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;
        Ok(Self::from_local(signer, chain_id))
    }

    /// Open the first account of a connected Ledger device.
    #[cfg(feature = "ledger")]
    pub async fn from_ledger(index: usize, chain_id: u64) -> BlockchainResult<Self> {
        use alloy::signers::ledger::{HDPath, LedgerSigner};
        use alloy::signers::Signer;

        let signer = LedgerSigner::new(HDPath::LedgerLive(index), Some(chain_id))
            .await
            .map_err(|e| BlockchainError::Wallet(format!("Failed to open Ledger: {}", e)))?;
        let address = signer.address();
        tracing::info!(address = %address, chain_id, backend = "ledger", "Wallet initialized");
        Ok(Self {
            inner: EthereumWallet::new(signer),
            address,
            kind: SignerKind::Ledger,
            nonce: Arc::new(AtomicU64::new(0)),
            chain_id,
        })
    }

    #[cfg(not(feature = "ledger"))]
    pub async fn from_ledger(_index: usize, _chain_id: u64) -> BlockchainResult<Self> {
        Err(BlockchainError::Wallet(
            "built without Ledger support; rebuild with `--features ledger`".to_string(),
        ))
    }

    /// Get the signing backend.
    pub fn kind(&self) -> SignerKind {
        self.kind
    }

    /// Get the chain ID this wallet is configured for.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

#[async_trait]
impl TransactionSigner for Wallet {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign(&self, draft: TxDraft) -> BlockchainResult<SignedTransaction> {
        if draft.chain_id != self.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.chain_id,
                actual: draft.chain_id,
            });
        }

        let mut request = TransactionRequest::default()
            .with_from(self.address)
            .with_value(draft.value)
            .with_nonce(draft.nonce)
            .with_gas_price(draft.gas_price)
            .with_gas_limit(draft.gas_limit)
            .with_chain_id(draft.chain_id);
        request = match draft.to {
            Some(to) => request.with_to(to).with_input(draft.input.clone()),
            None => request.with_deploy_code(draft.input.clone()),
        };

        let envelope: TxEnvelope = TransactionBuilder::<Ethereum>::build(request, &self.inner)
            .await
            .map_err(|e| BlockchainError::Wallet(format!("Signing failed: {}", e)))?;

        Ok(SignedTransaction {
            hash: *envelope.tx_hash(),
            raw: Bytes::from(envelope.encoded_2718()),
            draft,
        })
    }

    fn sync_nonce(&self, chain_nonce: u64) {
        self.nonce.store(chain_nonce, Ordering::SeqCst);
    }

    fn next_nonce(&self) -> u64 {
        self.nonce.fetch_add(1, Ordering::SeqCst)
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("kind", &self.kind)
            .field("chain_id", &self.chain_id)
            .finish()
    }
}
