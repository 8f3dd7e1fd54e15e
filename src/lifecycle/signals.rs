//! OS signal handling.
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGINT aborts the running operation; nothing is rolled back, so the
//!   hashes logged so far are the operator's record

/// Resolve when the operator presses Ctrl-C.
///
/// If the handler cannot be installed this never resolves and the
/// operation runs to completion.
pub async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::warn!("Interrupt received, aborting; check logged transaction hashes on-chain");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}
