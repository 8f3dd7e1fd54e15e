//! Token bind operations.
//!
//! # Data Flow
//! ```text
//! contract file → request.rs (BindRequest)
//! ToolConfig    → settings.rs (WorkflowSettings)
//!
//! deploy.rs       Deploy ──────────────────────────────▶ contract address
//! orchestrator.rs Approve → Bind ─┬─▶ TransferOwnership  (Done)
//!                                 └─▶ Reject             (Failed)
//! refund.rs       Refund (balance - gas → custody)
//! ```
//!
//! Every transaction goes through `steps.rs`: build, sign, submit, then wait
//! for the receipt before anything else is sent.

pub mod deploy;
pub mod error;
pub mod orchestrator;
pub mod refund;
pub mod request;
pub mod settings;
pub mod state;
mod steps;

pub use deploy::{deploy_contract, Deployment};
pub use error::WorkflowError;
pub use orchestrator::{BindWorkflow, WorkflowReport};
pub use refund::{refund_rest_balance, RefundOutcome, SkipReason};
pub use request::BindRequest;
pub use settings::WorkflowSettings;
pub use state::{Step, WorkflowState};
pub use steps::TxRecord;
