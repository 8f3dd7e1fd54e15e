//! Confirmation waiter.
//!
//! Turns a [`PendingTransaction`] into a [`TransactionOutcome`] by polling the
//! gateway for its receipt. The default strategy backs off exponentially
//! until a deadline; the fixed-delay strategy sleeps once and queries once,
//! which is how the tool behaved before polling was bounded.

use std::time::Duration;
use tokio::time::{sleep, Instant};

use crate::blockchain::gateway::ChainGateway;
use crate::blockchain::transaction::PendingTransaction;
use crate::blockchain::types::{BlockchainResult, TransactionOutcome};
use crate::config::schema::{ConfirmationConfig, PollStrategyKind};
use crate::resilience::Backoff;

/// How to poll for a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStrategy {
    /// Exponential backoff between `initial` and `max` until `deadline`.
    Backoff {
        initial: Duration,
        max: Duration,
        deadline: Duration,
    },
    /// Sleep once, query once.
    FixedDelay(Duration),
}

impl From<&ConfirmationConfig> for PollStrategy {
    fn from(config: &ConfirmationConfig) -> Self {
        match config.strategy {
            PollStrategyKind::Backoff => Self::Backoff {
                initial: Duration::from_millis(config.initial_delay_ms),
                max: Duration::from_millis(config.max_delay_ms),
                deadline: Duration::from_secs(config.timeout_secs),
            },
            PollStrategyKind::FixedDelay => {
                Self::FixedDelay(Duration::from_secs(config.fixed_delay_secs))
            }
        }
    }
}

/// Blocks the workflow until a submitted transaction settles.
pub struct ConfirmationWaiter<'a, G: ?Sized> {
    gateway: &'a G,
    strategy: PollStrategy,
}

impl<'a, G> ConfirmationWaiter<'a, G>
where
    G: ChainGateway + ?Sized,
{
    pub fn new(gateway: &'a G, strategy: PollStrategy) -> Self {
        Self { gateway, strategy }
    }

    pub fn from_config(gateway: &'a G, config: &ConfirmationConfig) -> Self {
        Self::new(gateway, PollStrategy::from(config))
    }

    /// Wait for `pending` to be mined.
    ///
    /// Under backoff, RPC errors while polling are logged and polling goes on
    /// until the deadline. Under fixed delay the single query's error is
    /// returned as is.
    pub async fn wait(&self, pending: PendingTransaction) -> BlockchainResult<TransactionOutcome> {
        let outcome = match &self.strategy {
            PollStrategy::FixedDelay(delay) => {
                sleep(*delay).await;
                match self.gateway.receipt(pending.hash).await? {
                    Some(receipt) => TransactionOutcome::from_receipt(receipt),
                    None => TransactionOutcome::Timeout,
                }
            }
            PollStrategy::Backoff {
                initial,
                max,
                deadline,
            } => self.poll_until(&pending, *initial, *max, *deadline).await,
        };

        metrics::counter!(
            "bind_tool_confirmations_total",
            "step" => pending.step.as_str(),
            "outcome" => outcome.label()
        )
        .increment(1);
        tracing::info!(
            step = %pending.step,
            tx_hash = %pending.hash,
            outcome = %outcome,
            "Transaction settled"
        );
        Ok(outcome)
    }

    async fn poll_until(
        &self,
        pending: &PendingTransaction,
        initial: Duration,
        max: Duration,
        deadline: Duration,
    ) -> TransactionOutcome {
        let started = Instant::now();
        let mut backoff = Backoff::new(initial, max);

        loop {
            let remaining = deadline.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                tracing::warn!(
                    step = %pending.step,
                    tx_hash = %pending.hash,
                    polls = backoff.attempts(),
                    waited_secs = deadline.as_secs(),
                    "No receipt before deadline"
                );
                return TransactionOutcome::Timeout;
            }

            let delay = backoff.next().unwrap_or(max);
            sleep(delay.min(remaining)).await;

            match self.gateway.receipt(pending.hash).await {
                Ok(Some(receipt)) => return TransactionOutcome::from_receipt(receipt),
                Ok(None) => {
                    tracing::debug!(tx_hash = %pending.hash, poll = backoff.attempts(), "Transaction pending");
                }
                Err(e) => {
                    tracing::warn!(tx_hash = %pending.hash, error = %e, "Receipt query failed, will retry");
                }
            }
        }
    }
}
