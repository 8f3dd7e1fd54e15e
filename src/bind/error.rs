//! Workflow error taxonomy.

use alloy::primitives::{Address, TxHash};
use thiserror::Error;

use crate::bind::state::{Step, WorkflowState};
use crate::blockchain::BlockchainError;
use crate::config::ConfigError;

/// Errors that abort a tool operation.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Missing or invalid input; nothing was submitted.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The transaction for `step` never entered the chain.
    #[error("{step} submission failed: {source}")]
    Submission {
        step: Step,
        #[source]
        source: BlockchainError,
    },

    /// A chain read failed.
    #[error(transparent)]
    Chain(#[from] BlockchainError),

    /// No receipt appeared before the confirmation deadline.
    #[error("{step} transaction {tx_hash} not confirmed before the deadline")]
    ConfirmationTimeout { step: Step, tx_hash: TxHash },

    /// The transaction was mined with status 0.
    #[error("{step} transaction {tx_hash} reverted on-chain")]
    OnChainFailure { step: Step, tx_hash: TxHash },

    /// Approve precondition: the token must already hold a supply.
    #[error("token {token} reports zero total supply; has the deployment settled?")]
    EmptySupply { token: Address },

    /// The transfer was mined but `owner()` does not report the custody account.
    #[error("token {token} is owned by {owner}, expected {expected}")]
    OwnershipNotTransferred {
        token: Address,
        owner: Address,
        expected: Address,
    },

    /// A deployment receipt without a created contract.
    #[error("deployment {tx_hash} produced no contract address")]
    MissingContractAddress { tx_hash: TxHash },

    #[error("illegal workflow transition {from} -> {to}")]
    IllegalTransition {
        from: WorkflowState,
        to: WorkflowState,
    },
}

impl WorkflowError {
    pub(crate) fn submission(step: Step) -> impl FnOnce(BlockchainError) -> Self {
        move |source| Self::Submission { step, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_step() {
        let err = WorkflowError::OnChainFailure {
            step: Step::Approve,
            tx_hash: TxHash::ZERO,
        };
        assert!(err.to_string().starts_with("approve transaction 0x0000"));

        let err = WorkflowError::submission(Step::Bind)(BlockchainError::Submission(
            "nonce too low".into(),
        ));
        assert_eq!(
            err.to_string(),
            "bind submission failed: Transaction submission rejected: nonce too low"
        );
    }
}
