//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every step produces:
//!     → logging.rs (structured log events: step, tx_hash, nonce, outcome)
//!     → `metrics` facade counters:
//!         bind_tool_transactions_total{step}
//!         bind_tool_confirmations_total{step, outcome}
//! ```
//!
//! # Design Decisions
//! - Transaction hashes are always logged so an aborted run can be audited
//! - The CLI installs no metrics recorder; an embedding process may
//! - Keys and passwords are never logged

pub mod logging;

pub use logging::init_logging;
