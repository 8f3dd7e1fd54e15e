//! BEP20 token deployment and cross-chain bind tool.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI (cli.rs)
//!     │
//!     ▼
//!   lifecycle ── config (TOML + contract file) ── observability (tracing)
//!     │
//!     ▼
//!   bind: deploy │ approve → bind → transferOwnership / reject │ refund
//!     │
//!     ▼
//!   blockchain: TxBuilder → TransactionSigner → ChainGateway → ConfirmationWaiter
//!                                                  │
//!                                                  ▼
//!                                         RPC providers (failover)
//! ```

pub mod bind;
pub mod blockchain;
pub mod cli;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use bind::{BindRequest, BindWorkflow, WorkflowError, WorkflowReport, WorkflowSettings};
pub use config::schema::ToolConfig;
