//! Command-line surface.

use alloy::primitives::Address;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Network, SignerBackend};

#[derive(Debug, Parser)]
#[command(name = "token-bind-tool")]
#[command(about = "Deploy a BEP20 token and bind it to its BEP2 counterpart", long_about = None)]
pub struct Cli {
    /// Network to operate on.
    #[arg(long, value_enum, default_value_t = Network::Testnet, global = true)]
    pub network: Network,

    /// Tool configuration file (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured signing backend.
    #[arg(long, value_enum, global = true)]
    pub signer: Option<SignerBackend>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create or load the operating account and show the custody account
    InitializeKey,
    /// Deploy the token contract from the operating account
    DeployContract {
        /// Contract file (JSON) with bytecode, symbols and custody account.
        #[arg(long)]
        contract: PathBuf,
    },
    /// Approve, bind and hand ownership of a deployed token to custody
    ApproveBindAndTransferOwnership {
        /// Contract file (JSON) with bytecode, symbols and custody account.
        #[arg(long)]
        contract: PathBuf,
        /// Address of the deployed token.
        #[arg(long)]
        contract_address: Address,
    },
    /// Send the operating account's leftover balance to custody
    RefundRestBalance {
        /// Account receiving the balance.
        #[arg(long)]
        custody_account: Address,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitializeKey => "initialize-key",
            Self::DeployContract { .. } => "deploy-contract",
            Self::ApproveBindAndTransferOwnership { .. } => "approve-bind-and-transfer-ownership",
            Self::RefundRestBalance { .. } => "refund-rest-balance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_approve_bind() {
        let cli = Cli::try_parse_from([
            "token-bind-tool",
            "--network",
            "mainnet",
            "approve-bind-and-transfer-ownership",
            "--contract",
            "token.json",
            "--contract-address",
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
        ])
        .unwrap();
        assert_eq!(cli.network, Network::Mainnet);
        assert_eq!(cli.command.name(), "approve-bind-and-transfer-ownership");
    }

    #[test]
    fn test_defaults_to_testnet() {
        let cli = Cli::try_parse_from(["token-bind-tool", "initialize-key"]).unwrap();
        assert_eq!(cli.network, Network::Testnet);
        assert!(cli.signer.is_none());
    }

    #[test]
    fn test_unknown_operation_rejected() {
        assert!(Cli::try_parse_from(["token-bind-tool", "refundRestBNB"]).is_err());
        assert!(Cli::try_parse_from([
            "token-bind-tool",
            "refund-rest-balance",
            "--custody-account",
            "not-an-address"
        ])
        .is_err());
    }
}
