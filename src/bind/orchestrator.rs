//! Bind workflow orchestrator.
//!
//! Drives one deployed token through Approve → Bind → TransferOwnership, or
//! Approve → Bind → Reject when the token manager refuses the bind. Each
//! transaction is confirmed before the next one is built, so at most one
//! transaction of the run is ever in flight.

use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, Bytes, U256};

use crate::bind::error::WorkflowError;
use crate::bind::request::BindRequest;
use crate::bind::settings::WorkflowSettings;
use crate::bind::state::{Step, WorkflowState};
use crate::bind::steps::{self, TxRecord};
use crate::blockchain::contracts;
use crate::blockchain::{
    CallSpec, ChainGateway, ConfirmationWaiter, TransactionOutcome, TransactionSigner, TxBuilder,
};

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    pub contract: Address,
    pub total_supply: U256,
    pub final_state: WorkflowState,
    pub transactions: Vec<TxRecord>,
}

impl WorkflowReport {
    /// Steps in submission order.
    pub fn steps(&self) -> Vec<Step> {
        self.transactions.iter().map(|t| t.step).collect()
    }

    pub fn is_success(&self) -> bool {
        self.final_state == WorkflowState::Done
    }

    pub fn record(&self, step: Step) -> Option<&TxRecord> {
        self.transactions.iter().find(|t| t.step == step)
    }
}

/// Mutable bookkeeping of a single run.
struct Run {
    state: WorkflowState,
    records: Vec<TxRecord>,
}

impl Run {
    fn new() -> Self {
        Self {
            state: WorkflowState::Deployed,
            records: Vec::new(),
        }
    }

    fn advance(&mut self, next: WorkflowState) -> Result<(), WorkflowError> {
        if !self.state.can_transition_to(next) {
            return Err(WorkflowError::IllegalTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::debug!(from = %self.state, to = %next, "Workflow transition");
        self.state = next;
        Ok(())
    }
}

/// Runs the bind state machine against a gateway and signer.
pub struct BindWorkflow<'a, G: ?Sized, S: ?Sized> {
    gateway: &'a G,
    signer: &'a S,
    settings: &'a WorkflowSettings,
}

impl<'a, G, S> BindWorkflow<'a, G, S>
where
    G: ChainGateway + ?Sized,
    S: TransactionSigner + ?Sized,
{
    pub fn new(gateway: &'a G, signer: &'a S, settings: &'a WorkflowSettings) -> Self {
        Self {
            gateway,
            signer,
            settings,
        }
    }

    /// Bind `contract` to the request's legacy symbol and hand ownership to
    /// the custody account.
    ///
    /// Returns a report ending in `Done`, or in `Failed` once a refused bind
    /// has been rejected. Any other problem aborts with an error.
    pub async fn run(
        &self,
        request: &BindRequest,
        contract: Address,
    ) -> Result<WorkflowReport, WorkflowError> {
        let builder = TxBuilder::new(self.gateway, self.signer, &self.settings.network);
        let waiter = ConfirmationWaiter::from_config(self.gateway, &self.settings.confirmation);
        let token_manager = self.settings.token_manager;
        let mut run = Run::new();

        // Approve
        let total_supply = contracts::total_supply(self.gateway, contract).await?;
        if total_supply.is_zero() {
            return Err(WorkflowError::EmptySupply { token: contract });
        }
        tracing::info!(
            %contract,
            %total_supply,
            symbol = %request.symbol,
            from = %builder.address(),
            "Approving token manager for total supply"
        );
        run.advance(WorkflowState::Approving)?;
        let pending = steps::send(
            &builder,
            Step::Approve,
            CallSpec::call(contract, contracts::approve_calldata(token_manager, total_supply)),
        )
        .await?;
        run.records.push(steps::settle_success(&waiter, pending).await?);
        run.advance(WorkflowState::Approved)?;

        // Bind
        run.advance(WorkflowState::Binding)?;
        let spec = self.handshake(contracts::approve_bind_calldata(contract, &request.bep2_symbol));
        let pending = steps::send(&builder, Step::Bind, spec).await?;
        let bind = steps::settle(&waiter, pending).await?;
        let accepted = bind.outcome.is_success();
        run.records.push(bind);

        if accepted {
            run.advance(WorkflowState::BindConfirmed)?;
            tracing::info!(%contract, bep2_symbol = %request.bep2_symbol, "Bind accepted");

            run.advance(WorkflowState::TransferringOwnership)?;
            tracing::info!(%contract, custody = %request.custody, "Transferring ownership");
            let pending = steps::send(
                &builder,
                Step::TransferOwnership,
                CallSpec::call(contract, contracts::transfer_ownership_calldata(request.custody)),
            )
            .await?;
            run.records.push(steps::settle_success(&waiter, pending).await?);

            let owner = contracts::owner(self.gateway, contract).await?;
            if owner != request.custody {
                return Err(WorkflowError::OwnershipNotTransferred {
                    token: contract,
                    owner,
                    expected: request.custody,
                });
            }
            run.advance(WorkflowState::Done)?;
        } else {
            run.advance(WorkflowState::BindRejected)?;
            tracing::warn!(%contract, bep2_symbol = %request.bep2_symbol, "Bind refused, rejecting");

            run.advance(WorkflowState::Rejecting)?;
            let spec = self.handshake(contracts::reject_bind_calldata(contract, &request.bep2_symbol));
            let pending = steps::send(&builder, Step::Reject, spec).await?;
            let (step, hash) = (pending.step, pending.hash);
            // The run ends Failed whatever the reject does; only report it.
            let outcome = waiter.wait(pending).await?;
            if outcome == TransactionOutcome::Timeout {
                tracing::warn!(tx_hash = %hash, "Reject not confirmed before the deadline");
            } else {
                run.advance(WorkflowState::RejectConfirmed)?;
            }
            tracing::info!(tx_hash = %hash, %outcome, "Reject settled");
            run.records.push(TxRecord { step, hash, outcome });
            run.advance(WorkflowState::Failed)?;
        }

        tracing::info!(
            %contract,
            final_state = %run.state,
            transactions = run.records.len(),
            "Bind workflow finished"
        );
        Ok(WorkflowReport {
            contract,
            total_supply,
            final_state: run.state,
            transactions: run.records,
        })
    }

    /// Token manager call carrying the relay fee and a fixed gas limit.
    fn handshake(&self, input: Bytes) -> CallSpec {
        tracing::debug!(fee = %format_ether(self.settings.relay_fee), "Attaching relay fee");
        CallSpec {
            gas_limit: Some(self.settings.handshake_gas_limit),
            ..CallSpec::call(self.settings.token_manager, input).with_value(self.settings.relay_fee)
        }
    }
}
