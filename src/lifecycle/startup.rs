//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging, connect to the network, open the signer
//! - Dispatch the selected operation and print its result
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and nothing is submitted
//! - Subsystems initialize in order, not concurrently
//! - The signer opens last, after the network is known to be the right one

use alloy::primitives::utils::format_ether;
use alloy::primitives::Address;
use std::path::Path;

use crate::bind::{
    deploy_contract, refund_rest_balance, BindRequest, BindWorkflow, RefundOutcome,
    WorkflowReport, WorkflowSettings,
};
use crate::blockchain::keystore::{self, KeystoreOrigin};
use crate::blockchain::{BlockchainClient, TransactionSigner, Wallet};
use crate::cli::{Cli, Command};
use crate::config::loader::require_env;
use crate::config::{load_config_or_default, load_contract_file, SignerBackend, ToolConfig};
use crate::lifecycle::exit::AppError;
use crate::lifecycle::signals;
use crate::observability::init_logging;

/// Run one CLI invocation to completion.
pub async fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = load_config_or_default(cli.config.as_deref())?;
    if let Some(backend) = cli.signer {
        config.signer.backend = backend;
    }
    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        network = %cli.network,
        operation = cli.command.name(),
        "token-bind-tool starting"
    );

    let settings = WorkflowSettings::resolve(&config, cli.network)?;
    tracing::info!(
        rpc_url = %settings.network.rpc_url,
        chain_id = settings.network.chain_id,
        signer = ?config.signer.backend,
        "Configuration loaded"
    );

    tokio::select! {
        result = dispatch(&cli.command, &config, &settings) => result,
        () = signals::interrupted() => Err(AppError::Interrupted),
    }
}

async fn dispatch(
    command: &Command,
    config: &ToolConfig,
    settings: &WorkflowSettings,
) -> Result<(), AppError> {
    match command {
        Command::InitializeKey => initialize_key(config, settings).await,
        Command::DeployContract { contract } => {
            let request = load_request(contract, settings)?;
            let client = connect(settings).await?;
            let signer = open_signer(config, settings).await?;

            let deployment = deploy_contract(&client, &signer, settings, &request).await?;
            println!("Deployed {} at {}", request.symbol, deployment.contract);
            println!("  tx {}", deployment.tx_hash);
            if let Some(block) = deployment.block_number {
                println!("  block {}", block);
            }
            Ok(())
        }
        Command::ApproveBindAndTransferOwnership {
            contract,
            contract_address,
        } => {
            let request = load_request(contract, settings)?;
            let client = connect(settings).await?;
            let signer = open_signer(config, settings).await?;

            let workflow = BindWorkflow::new(&client, &signer, settings);
            let report = workflow.run(&request, *contract_address).await?;
            print_report(&request, &report);
            if report.is_success() {
                Ok(())
            } else {
                Err(AppError::BindRejected {
                    contract: report.contract.to_string(),
                    bep2_symbol: request.bep2_symbol.clone(),
                })
            }
        }
        Command::RefundRestBalance { custody_account } => {
            let client = connect(settings).await?;
            let signer = open_signer(config, settings).await?;
            refund(&client, &signer, settings, *custody_account).await
        }
    }
}

async fn initialize_key(config: &ToolConfig, settings: &WorkflowSettings) -> Result<(), AppError> {
    let password = require_env(&config.keystore.password_env)?;
    let (signer, origin) = keystore::load_or_create(Path::new(&config.keystore.dir), &password)
        .map_err(AppError::Signer)?;
    match origin {
        KeystoreOrigin::Created(path) => {
            println!("Created operating account {}", signer.address());
            println!("  keystore {}", path.display());
            println!("Fund this account before deploying.");
        }
        KeystoreOrigin::Loaded(path) => {
            println!("Operating account {}", signer.address());
            println!("  keystore {}", path.display());
        }
    }

    if cfg!(feature = "ledger") {
        match Wallet::from_ledger(config.signer.ledger_index, settings.network.chain_id).await {
            Ok(ledger) => println!(
                "Custody account (Ledger #{}) {}",
                config.signer.ledger_index,
                ledger.address()
            ),
            Err(e) => tracing::warn!(error = %e, "Ledger not available, custody account not shown"),
        }
    }
    Ok(())
}

async fn refund(
    client: &BlockchainClient,
    signer: &Wallet,
    settings: &WorkflowSettings,
    custody: Address,
) -> Result<(), AppError> {
    match refund_rest_balance(client, signer, settings, custody).await? {
        RefundOutcome::Skipped { balance, reason } => {
            println!(
                "Nothing refunded ({:?}); balance {} BNB",
                reason,
                format_ether(balance)
            );
        }
        RefundOutcome::Sent {
            amount,
            gas_cost,
            tx_hash,
        } => {
            println!(
                "Refunded {} BNB to {} (gas {} BNB)",
                format_ether(amount),
                custody,
                format_ether(gas_cost)
            );
            println!("  tx {}", tx_hash);
        }
    }
    Ok(())
}

fn load_request(path: &Path, settings: &WorkflowSettings) -> Result<BindRequest, AppError> {
    let file = load_contract_file(path)?;
    let request = BindRequest::from_contract_file(&file, settings.network.chain_id)?;
    tracing::info!(
        symbol = %request.symbol,
        bep2_symbol = %request.bep2_symbol,
        custody = %request.custody,
        "Contract file loaded"
    );
    Ok(request)
}

async fn connect(settings: &WorkflowSettings) -> Result<BlockchainClient, AppError> {
    BlockchainClient::connect(settings.network.clone())
        .await
        .map_err(AppError::Network)
}

async fn open_signer(config: &ToolConfig, settings: &WorkflowSettings) -> Result<Wallet, AppError> {
    let chain_id = settings.network.chain_id;
    let wallet = match config.signer.backend {
        SignerBackend::Keystore => {
            let password = require_env(&config.keystore.password_env)?;
            let (signer, _) = keystore::load_or_create(Path::new(&config.keystore.dir), &password)
                .map_err(AppError::Signer)?;
            Wallet::from_local(signer, chain_id)
        }
        SignerBackend::Ledger => Wallet::from_ledger(config.signer.ledger_index, chain_id)
            .await
            .map_err(AppError::Signer)?,
    };
    tracing::info!(
        address = %wallet.address(),
        backend = %wallet.kind(),
        chain_id = wallet.chain_id(),
        "Operating account ready"
    );
    Ok(wallet)
}

fn print_report(request: &BindRequest, report: &WorkflowReport) {
    println!(
        "{} ({}) at {}: {}",
        request.symbol, request.bep2_symbol, report.contract, report.final_state
    );
    println!("  total supply {}", report.total_supply);
    for tx in &report.transactions {
        println!("  {:<20} {} {}", tx.step.to_string(), tx.hash, tx.outcome);
    }
}
