//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses, URLs and hex payloads parse
//! - Validate value ranges (timeouts > 0, delays ordered)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function of the config
//! - Runs before any transaction is built

use alloy::primitives::{hex, Address};
use thiserror::Error;

use crate::config::schema::{ContractFile, NetworkConfig, PollStrategyKind, ToolConfig};

/// A single semantic problem in a config or contract file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: String },

    #[error("{field} is not a valid address: {value}")]
    InvalidAddress { field: String, value: String },

    #[error("{field} is not valid hex: {reason}")]
    InvalidHex { field: String, reason: String },

    #[error("{field} is not a valid URL: {value}")]
    InvalidUrl { field: String, value: String },

    #[error("{field} {reason}")]
    OutOfRange { field: String, reason: String },
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate the tool configuration.
pub fn validate_config(config: &ToolConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_network("networks.mainnet", &config.networks.mainnet, &mut errors);
    validate_network("networks.testnet", &config.networks.testnet, &mut errors);

    check_address("bind.token_manager", &config.bind.token_manager, &mut errors);
    if config.bind.relay_fee_wei == 0 {
        errors.push(out_of_range("bind.relay_fee_wei", "must be greater than zero"));
    }
    if config.bind.handshake_gas_limit < 21_000 {
        errors.push(out_of_range("bind.handshake_gas_limit", "must be at least 21000"));
    }

    let c = &config.confirmation;
    match c.strategy {
        PollStrategyKind::Backoff => {
            if c.timeout_secs == 0 {
                errors.push(out_of_range("confirmation.timeout_secs", "must be greater than zero"));
            }
            if c.initial_delay_ms == 0 {
                errors.push(out_of_range(
                    "confirmation.initial_delay_ms",
                    "must be greater than zero",
                ));
            }
            if c.max_delay_ms < c.initial_delay_ms {
                errors.push(out_of_range(
                    "confirmation.max_delay_ms",
                    "must not be below confirmation.initial_delay_ms",
                ));
            }
        }
        PollStrategyKind::FixedDelay => {
            if c.fixed_delay_secs == 0 {
                errors.push(out_of_range(
                    "confirmation.fixed_delay_secs",
                    "must be greater than zero",
                ));
            }
        }
    }

    if config.keystore.dir.trim().is_empty() {
        errors.push(empty("keystore.dir"));
    }
    if config.keystore.password_env.trim().is_empty() {
        errors.push(empty("keystore.password_env"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(out_of_range(
            "observability.log_level",
            "must be one of trace, debug, info, warn, error",
        ));
    }

    finish(errors)
}

/// Validate a per-token contract file.
pub fn validate_contract_file(file: &ContractFile) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if file.contract_data.trim().is_empty() {
        errors.push(empty("contract_data"));
    } else if let Err(e) = hex::decode(file.contract_data.trim()) {
        errors.push(ValidationError::InvalidHex {
            field: "contract_data".to_string(),
            reason: e.to_string(),
        });
    }

    if file.symbol.trim().is_empty() {
        errors.push(empty("symbol"));
    }
    if file.bep2_symbol.trim().is_empty() {
        errors.push(empty("bep2_symbol"));
    }

    if let Some(addr) = check_address("ledger_account", &file.ledger_account, &mut errors) {
        if addr == Address::ZERO {
            errors.push(out_of_range("ledger_account", "must not be the zero address"));
        }
    }

    finish(errors)
}

fn validate_network(prefix: &str, network: &NetworkConfig, errors: &mut Vec<ValidationError>) {
    if network.rpc_url.trim().is_empty() {
        errors.push(empty(&format!("{prefix}.rpc_url")));
    } else if network.rpc_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError::InvalidUrl {
            field: format!("{prefix}.rpc_url"),
            value: network.rpc_url.clone(),
        });
    }
    if network.chain_id == 0 {
        errors.push(out_of_range(&format!("{prefix}.chain_id"), "must be set"));
    }
    if network.rpc_timeout_secs == 0 {
        errors.push(out_of_range(
            &format!("{prefix}.rpc_timeout_secs"),
            "must be greater than zero",
        ));
    }
    if !(network.gas_price_multiplier >= 1.0) || !network.gas_price_multiplier.is_finite() {
        errors.push(out_of_range(
            &format!("{prefix}.gas_price_multiplier"),
            "must be at least 1.0",
        ));
    }
}

/// Parse an address field, recording an error when it is empty or malformed.
pub(crate) fn check_address(
    field: &str,
    value: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<Address> {
    let value = value.trim();
    if value.is_empty() {
        errors.push(empty(field));
        return None;
    }
    match value.parse::<Address>() {
        Ok(addr) => Some(addr),
        Err(_) => {
            errors.push(ValidationError::InvalidAddress {
                field: field.to_string(),
                value: value.to_string(),
            });
            None
        }
    }
}

fn empty(field: &str) -> ValidationError {
    ValidationError::Empty {
        field: field.to_string(),
    }
}

fn out_of_range(field: &str, reason: &str) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn finish(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
