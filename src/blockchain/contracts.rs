//! ABI bindings for the contracts the bind workflow talks to.
//!
//! Calls are encoded here and sent through [`ChainGateway`] so the workflow
//! stays independent of any concrete provider type.
//!
//! [`ChainGateway`]: crate::blockchain::gateway::ChainGateway

use alloy::primitives::{address, Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::blockchain::gateway::ChainGateway;
use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// System contract that manages cross-chain token binds.
pub const TOKEN_MANAGER: Address = address!("0000000000000000000000000000000000001008");

sol! {
    /// BEP20 token surface used by the workflow.
    #[derive(Debug, PartialEq, Eq)]
    interface IBEP20 {
        function totalSupply() external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// Ownership surface of the deployed token.
    #[derive(Debug, PartialEq, Eq)]
    interface IOwnable {
        function owner() external view returns (address);
        function transferOwnership(address newOwner) external;
    }

    /// Token manager bind handshake.
    #[derive(Debug, PartialEq, Eq)]
    interface ITokenManager {
        function approveBind(address contractAddr, string bep2Symbol) external payable returns (bool);
        function rejectBind(address contractAddr, string bep2Symbol) external payable returns (bool);
    }
}

pub fn approve_calldata(spender: Address, amount: U256) -> Bytes {
    IBEP20::approveCall { spender, amount }.abi_encode().into()
}

pub fn approve_bind_calldata(contract: Address, symbol: &str) -> Bytes {
    ITokenManager::approveBindCall {
        contractAddr: contract,
        bep2Symbol: symbol.to_string(),
    }
    .abi_encode()
    .into()
}

pub fn reject_bind_calldata(contract: Address, symbol: &str) -> Bytes {
    ITokenManager::rejectBindCall {
        contractAddr: contract,
        bep2Symbol: symbol.to_string(),
    }
    .abi_encode()
    .into()
}

pub fn transfer_ownership_calldata(new_owner: Address) -> Bytes {
    IOwnable::transferOwnershipCall { newOwner: new_owner }
        .abi_encode()
        .into()
}

/// Read `totalSupply()` from a deployed token.
pub async fn total_supply<G>(gateway: &G, token: Address) -> BlockchainResult<U256>
where
    G: ChainGateway + ?Sized,
{
    let out = gateway
        .call(token, IBEP20::totalSupplyCall {}.abi_encode().into())
        .await?;
    IBEP20::totalSupplyCall::abi_decode_returns(&out).map_err(|e| BlockchainError::Abi {
        call: "totalSupply",
        reason: e.to_string(),
    })
}

/// Read `owner()` from a deployed token.
pub async fn owner<G>(gateway: &G, token: Address) -> BlockchainResult<Address>
where
    G: ChainGateway + ?Sized,
{
    let out = gateway
        .call(token, IOwnable::ownerCall {}.abi_encode().into())
        .await?;
    IOwnable::ownerCall::abi_decode_returns(&out).map_err(|e| BlockchainError::Abi {
        call: "owner",
        reason: e.to_string(),
    })
}
