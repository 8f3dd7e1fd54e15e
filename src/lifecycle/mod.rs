//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Logging → Connect → Signer → Operation
//!
//! Signals (signals.rs):
//!     SIGINT → abort the running operation
//!
//! Exit (exit.rs):
//!     AppError → process exit code
//! ```

pub mod exit;
pub mod signals;
pub mod startup;

pub use exit::AppError;
pub use startup::run;
