//! Resolved, typed parameters shared by every operation.

use alloy::primitives::{Address, U256};

use crate::config::validation::{check_address, ValidationError};
use crate::config::{ConfigError, ConfirmationConfig, Network, NetworkConfig, ToolConfig};

/// Everything an operation needs from [`ToolConfig`], parsed once.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSettings {
    pub network: NetworkConfig,
    pub token_manager: Address,
    pub relay_fee: U256,
    /// Fixed gas limit for `approveBind` and `rejectBind`.
    pub handshake_gas_limit: u64,
    pub confirmation: ConfirmationConfig,
    pub dust_threshold: U256,
}

impl WorkflowSettings {
    pub fn resolve(config: &ToolConfig, network: Network) -> Result<Self, ConfigError> {
        let mut errors: Vec<ValidationError> = Vec::new();
        let token_manager =
            check_address("bind.token_manager", &config.bind.token_manager, &mut errors);
        let Some(token_manager) = token_manager else {
            return Err(ConfigError::Validation(errors));
        };

        Ok(Self {
            network: config.networks.get(network).clone(),
            token_manager,
            relay_fee: U256::from(config.bind.relay_fee_wei),
            handshake_gas_limit: config.bind.handshake_gas_limit,
            confirmation: config.confirmation.clone(),
            dust_threshold: U256::from(config.refund.dust_threshold_wei),
        })
    }
}
