//! The immutable input of a bind run.

use alloy::primitives::{hex, Address, Bytes};

use crate::config::validation::validate_contract_file;
use crate::config::{ConfigError, ContractFile};

/// What to bind, built once from the contract file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindRequest {
    /// BEP20 symbol, for display only.
    pub symbol: String,
    /// Legacy symbol registered with the token manager.
    pub bep2_symbol: String,
    /// Creation bytecode of the token contract.
    pub bytecode: Bytes,
    /// Custody account receiving ownership.
    pub custody: Address,
    pub chain_id: u64,
}

impl BindRequest {
    pub fn from_contract_file(file: &ContractFile, chain_id: u64) -> Result<Self, ConfigError> {
        validate_contract_file(file).map_err(ConfigError::Validation)?;

        // Both parses are covered by validation above.
        let bytecode = hex::decode(file.contract_data.trim())
            .map(Bytes::from)
            .unwrap_or_default();
        let custody = file.ledger_account.trim().parse().unwrap_or(Address::ZERO);

        Ok(Self {
            symbol: file.symbol.trim().to_string(),
            bep2_symbol: file.bep2_symbol.trim().to_string(),
            bytecode,
            custody,
            chain_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_contract_file() {
        let file = ContractFile {
            contract_data: "0x60806040".to_string(),
            symbol: " ABC ".to_string(),
            bep2_symbol: "ABC-123".to_string(),
            ledger_account: "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_string(),
        };
        let request = BindRequest::from_contract_file(&file, 97).unwrap();
        assert_eq!(request.bytecode, Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]));
        assert_eq!(request.symbol, "ABC");
        assert_eq!(request.chain_id, 97);
        assert_ne!(request.custody, Address::ZERO);
    }

    #[test]
    fn test_invalid_file_is_a_config_error() {
        let err = BindRequest::from_contract_file(&ContractFile::default(), 97).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref v) if v.len() == 4));
    }
}
