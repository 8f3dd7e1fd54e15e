//! Shared utilities for integration tests: a scripted in-memory chain and an
//! operating account signing with a well-known development key.
#![allow(dead_code)]

use alloy::primitives::{address, Address, Bytes, TxHash, U256};
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use token_bind_tool::bind::{BindRequest, WorkflowSettings};
use token_bind_tool::blockchain::contracts::{IBEP20, IOwnable, ITokenManager};
use token_bind_tool::blockchain::{
    BlockchainError, BlockchainResult, ChainGateway, ChainId, ReceiptSummary, SignedTransaction,
    Wallet,
};
use token_bind_tool::config::{Network, ToolConfig};

pub const CHAIN_ID: u64 = 97;
pub const GWEI: u128 = 1_000_000_000;
pub const ESTIMATED_GAS: u64 = 100_000;

/// First Anvil development key; address 0xf39F…2266.
pub const OPERATOR_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub const TOKEN: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
pub const CUSTODY: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
pub const DEPLOYED: Address = address!("cccccccccccccccccccccccccccccccccccccccc");

pub fn operator() -> Wallet {
    Wallet::from_private_key(OPERATOR_KEY, CHAIN_ID).unwrap()
}

/// Default testnet settings.
pub fn settings() -> WorkflowSettings {
    WorkflowSettings::resolve(&ToolConfig::default(), Network::Testnet).unwrap()
}

pub fn request(symbol: &str, bep2_symbol: &str) -> BindRequest {
    BindRequest {
        symbol: symbol.to_string(),
        bep2_symbol: bep2_symbol.to_string(),
        bytecode: Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]),
        custody: CUSTODY,
        chain_id: CHAIN_ID,
    }
}

/// A submitted transaction, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Deploy,
    Approve { spender: Address, amount: U256 },
    ApproveBind { contract: Address, symbol: String, fee: U256 },
    RejectBind { contract: Address, symbol: String, fee: U256 },
    TransferOwnership { new_owner: Address },
    Transfer { to: Address, value: U256 },
    Unknown,
}

impl Call {
    fn decode(tx: &SignedTransaction) -> Self {
        let draft = &tx.draft;
        let Some(to) = draft.to else {
            return Self::Deploy;
        };
        let input = draft.input.as_ref();
        if input.is_empty() {
            return Self::Transfer {
                to,
                value: draft.value,
            };
        }
        if let Ok(call) = IBEP20::approveCall::abi_decode(input) {
            return Self::Approve {
                spender: call.spender,
                amount: call.amount,
            };
        }
        if let Ok(call) = ITokenManager::approveBindCall::abi_decode(input) {
            return Self::ApproveBind {
                contract: call.contractAddr,
                symbol: call.bep2Symbol,
                fee: draft.value,
            };
        }
        if let Ok(call) = ITokenManager::rejectBindCall::abi_decode(input) {
            return Self::RejectBind {
                contract: call.contractAddr,
                symbol: call.bep2Symbol,
                fee: draft.value,
            };
        }
        if let Ok(call) = IOwnable::transferOwnershipCall::abi_decode(input) {
            return Self::TransferOwnership {
                new_owner: call.newOwner,
            };
        }
        Self::Unknown
    }

    fn selector(tx: &SignedTransaction) -> Option<[u8; 4]> {
        let input = tx.draft.input.as_ref();
        if tx.draft.to.is_none() || input.len() < 4 {
            return None;
        }
        Some([input[0], input[1], input[2], input[3]])
    }
}

#[derive(Default)]
struct ChainState {
    submitted: Vec<SignedTransaction>,
    polls: HashMap<TxHash, u32>,
    receipt_errors_left: u32,
    receipt_queries: u32,
}

/// Scripted chain. Configure with the builder methods, then hand it to the
/// code under test as a [`ChainGateway`].
pub struct MockChain {
    chain_id: u64,
    total_supply: U256,
    balance: U256,
    gas_price: u128,
    base_nonce: u64,
    reverting: Vec<[u8; 4]>,
    unmined: Vec<[u8; 4]>,
    owner: Address,
    revert_deploy: bool,
    omit_contract_address: bool,
    pending_polls: u32,
    never_mined: bool,
    fail_submit_at: Option<usize>,
    state: Mutex<ChainState>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            chain_id: CHAIN_ID,
            total_supply: U256::from(1000u64),
            balance: U256::from(10u64.pow(18)),
            gas_price: 10 * GWEI,
            base_nonce: 0,
            reverting: Vec::new(),
            unmined: Vec::new(),
            owner: CUSTODY,
            revert_deploy: false,
            omit_contract_address: false,
            pending_polls: 0,
            never_mined: false,
            fail_submit_at: None,
            state: Mutex::new(ChainState::default()),
        }
    }

    pub fn with_total_supply(mut self, supply: u64) -> Self {
        self.total_supply = U256::from(supply);
        self
    }

    pub fn with_balance(mut self, balance: U256) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = gas_price;
        self
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.base_nonce = nonce;
        self
    }

    /// Mine calls with this selector with status 0.
    pub fn reverting(mut self, selector: [u8; 4]) -> Self {
        self.reverting.push(selector);
        self
    }

    /// Never mine calls with this selector.
    pub fn never_mining(mut self, selector: [u8; 4]) -> Self {
        self.unmined.push(selector);
        self
    }

    /// Address reported by `owner()`.
    pub fn with_owner(mut self, owner: Address) -> Self {
        self.owner = owner;
        self
    }

    pub fn reverting_deploy(mut self) -> Self {
        self.revert_deploy = true;
        self
    }

    pub fn without_contract_address(mut self) -> Self {
        self.omit_contract_address = true;
        self
    }

    /// Report every transaction as pending for `polls` receipt queries.
    pub fn pending_for(mut self, polls: u32) -> Self {
        self.pending_polls = polls;
        self
    }

    pub fn never_mined(mut self) -> Self {
        self.never_mined = true;
        self
    }

    /// Fail the first `count` receipt queries with an RPC error.
    pub fn receipt_errors(self, count: u32) -> Self {
        self.lock().receipt_errors_left = count;
        self
    }

    /// Refuse the submission with this zero-based index.
    pub fn failing_submit_at(mut self, index: usize) -> Self {
        self.fail_submit_at = Some(index);
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ChainState> {
        self.state.lock().unwrap()
    }

    pub fn submitted(&self) -> Vec<SignedTransaction> {
        self.lock().submitted.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().submitted.iter().map(Call::decode).collect()
    }

    pub fn nonces(&self) -> Vec<u64> {
        self.lock().submitted.iter().map(|tx| tx.draft.nonce).collect()
    }

    pub fn receipt_queries(&self) -> u32 {
        self.lock().receipt_queries
    }
}

#[async_trait]
impl ChainGateway for MockChain {
    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        Ok(ChainId(self.chain_id))
    }

    async fn submit(&self, tx: &SignedTransaction) -> BlockchainResult<TxHash> {
        let mut state = self.lock();
        if self.fail_submit_at == Some(state.submitted.len()) {
            return Err(BlockchainError::Submission("insufficient funds".to_string()));
        }
        state.submitted.push(tx.clone());
        Ok(tx.hash)
    }

    async fn receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<ReceiptSummary>> {
        let mut state = self.lock();
        state.receipt_queries += 1;
        if state.receipt_errors_left > 0 {
            state.receipt_errors_left -= 1;
            return Err(BlockchainError::Rpc("connection reset".to_string()));
        }
        let Some(index) = state.submitted.iter().position(|tx| tx.hash == tx_hash) else {
            return Ok(None);
        };
        let selector = Call::selector(&state.submitted[index]);
        if self.never_mined || selector.is_some_and(|s| self.unmined.contains(&s)) {
            return Ok(None);
        }
        let polls = state.polls.entry(tx_hash).or_insert(0);
        *polls += 1;
        if *polls <= self.pending_polls {
            return Ok(None);
        }

        let tx = &state.submitted[index];
        let is_deploy = tx.draft.to.is_none();
        let status = if is_deploy {
            !self.revert_deploy
        } else {
            selector.map_or(true, |s| !self.reverting.contains(&s))
        };
        let contract_address = (is_deploy && status && !self.omit_contract_address).then_some(DEPLOYED);

        Ok(Some(ReceiptSummary {
            tx_hash,
            status,
            contract_address,
            block_number: Some(100 + index as u64),
            gas_used: tx.draft.gas_limit / 2,
        }))
    }

    async fn call(&self, _to: Address, data: Bytes) -> BlockchainResult<Bytes> {
        let selector = data.get(..4).unwrap_or_default();
        if selector == IBEP20::totalSupplyCall::SELECTOR {
            return Ok(Bytes::from(self.total_supply.to_be_bytes::<32>().to_vec()));
        }
        if selector == IOwnable::ownerCall::SELECTOR {
            return Ok(Bytes::from(self.owner.into_word().to_vec()));
        }
        Err(BlockchainError::Rpc("execution reverted".to_string()))
    }

    async fn balance(&self, _address: Address) -> BlockchainResult<U256> {
        Ok(self.balance)
    }

    async fn pending_nonce(&self, _address: Address) -> BlockchainResult<u64> {
        Ok(self.base_nonce + self.lock().submitted.len() as u64)
    }

    async fn gas_price(&self) -> BlockchainResult<u128> {
        Ok(self.gas_price)
    }

    async fn estimate_gas(
        &self,
        _from: Address,
        _to: Option<Address>,
        _value: U256,
        _input: &Bytes,
    ) -> BlockchainResult<u64> {
        Ok(ESTIMATED_GAS)
    }
}
