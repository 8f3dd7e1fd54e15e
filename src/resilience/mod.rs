//! Resilience helpers.
//!
//! # Design Decisions
//! - Every wait on the chain has a deadline
//! - Polling backs off exponentially with jitter instead of hammering the node
//! - Nothing here retries a transaction submission; only reads are repeated

pub mod backoff;

pub use backoff::{calculate_backoff, Backoff};
