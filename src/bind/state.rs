//! Bind workflow states and steps.
//!
//! ```text
//! Deployed → Approving → Approved → Binding ─┬─▶ BindConfirmed → TransferringOwnership → Done
//!                                            └─▶ BindRejected → Rejecting → RejectConfirmed → Failed
//!                                                                         └───────────────────▶ Failed
//! ```

use std::fmt;

/// A transaction-issuing step of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Deploy,
    Approve,
    Bind,
    Reject,
    TransferOwnership,
    Refund,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deploy => "deploy",
            Self::Approve => "approve",
            Self::Bind => "bind",
            Self::Reject => "reject",
            Self::TransferOwnership => "transfer_ownership",
            Self::Refund => "refund",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a run in the bind state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Deployed,
    Approving,
    Approved,
    Binding,
    BindConfirmed,
    BindRejected,
    Rejecting,
    RejectConfirmed,
    TransferringOwnership,
    Done,
    Failed,
}

impl WorkflowState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: Self) -> bool {
        use WorkflowState::*;
        matches!(
            (self, next),
            (Deployed, Approving)
                | (Approving, Approved)
                | (Approved, Binding)
                | (Binding, BindConfirmed)
                | (Binding, BindRejected)
                | (BindRejected, Rejecting)
                | (Rejecting, RejectConfirmed)
                | (RejectConfirmed, Failed)
                // reject not confirmed in time; the run still ends Failed
                | (Rejecting, Failed)
                | (BindConfirmed, TransferringOwnership)
                | (TransferringOwnership, Done)
        )
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use WorkflowState::*;

    #[test]
    fn test_happy_path_is_legal() {
        let path = [
            Deployed,
            Approving,
            Approved,
            Binding,
            BindConfirmed,
            TransferringOwnership,
            Done,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_reject_path_is_legal() {
        let path = [Binding, BindRejected, Rejecting, RejectConfirmed, Failed];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]));
        }
    }

    #[test]
    fn test_cross_branch_moves_are_illegal() {
        assert!(!BindRejected.can_transition_to(TransferringOwnership));
        assert!(!BindConfirmed.can_transition_to(Rejecting));
        assert!(!Deployed.can_transition_to(Binding));
        assert!(!Done.can_transition_to(Approving));
    }

    #[test]
    fn test_step_labels() {
        assert_eq!(Step::TransferOwnership.to_string(), "transfer_ownership");
        assert_eq!(Step::Reject.as_str(), "reject");
    }
}
