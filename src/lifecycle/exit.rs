//! Operation errors and their process exit codes.

use thiserror::Error;

use crate::bind::WorkflowError;
use crate::blockchain::BlockchainError;
use crate::config::ConfigError;

pub const EXIT_OTHER: u8 = 1;
pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_SUBMISSION: u8 = 3;
pub const EXIT_CONFIRMATION_TIMEOUT: u8 = 4;
pub const EXIT_ON_CHAIN_FAILURE: u8 = 5;
pub const EXIT_BIND_REJECTED: u8 = 6;
pub const EXIT_INTERRUPTED: u8 = 130;

/// Anything that ends a CLI run unsuccessfully.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The operating account could not be opened.
    #[error("Signer error: {0}")]
    Signer(#[source] BlockchainError),

    /// Chain id mismatch or unreachable endpoints at startup.
    #[error("Network error: {0}")]
    Network(#[source] BlockchainError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// The bind was refused and compensated with a reject.
    #[error("bind of {bep2_symbol} to {contract} was refused and rejected")]
    BindRejected { contract: String, bep2_symbol: String },

    #[error("interrupted")]
    Interrupted,
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Signer(_) => EXIT_CONFIG,
            Self::Network(BlockchainError::ChainMismatch { .. }) => EXIT_CONFIG,
            Self::Network(_) => EXIT_SUBMISSION,
            Self::Workflow(e) => workflow_exit_code(e),
            Self::BindRejected { .. } => EXIT_BIND_REJECTED,
            Self::Interrupted => EXIT_INTERRUPTED,
        }
    }
}

fn workflow_exit_code(error: &WorkflowError) -> u8 {
    match error {
        WorkflowError::Config(_) => EXIT_CONFIG,
        WorkflowError::Submission { .. } | WorkflowError::Chain(_) => EXIT_SUBMISSION,
        WorkflowError::ConfirmationTimeout { .. } => EXIT_CONFIRMATION_TIMEOUT,
        WorkflowError::OnChainFailure { .. }
        | WorkflowError::EmptySupply { .. }
        | WorkflowError::OwnershipNotTransferred { .. }
        | WorkflowError::MissingContractAddress { .. } => EXIT_ON_CHAIN_FAILURE,
        WorkflowError::IllegalTransition { .. } => EXIT_OTHER,
    }
}
