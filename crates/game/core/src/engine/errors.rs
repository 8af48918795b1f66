//! Error types for the action execution pipeline.

use crate::error::{GuardRejection, InvariantViolation};

/// Identifies which stage of the transition pipeline produced an error.
///
/// `apply` is infallible, so only the two validation phases appear here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

impl std::fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced while executing an action through the item engine.
///
/// Neither variant changes the record: a rejection is a plain no-op and an
/// invariant failure discards the working copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("{action} rejected: {reason}")]
    Rejected {
        action: &'static str,
        reason: GuardRejection,
    },

    #[error("{action} would break an invariant: {violation}")]
    Invariant {
        action: &'static str,
        violation: InvariantViolation,
    },
}

impl ExecuteError {
    pub fn phase(&self) -> TransitionPhase {
        match self {
            ExecuteError::Rejected { .. } => TransitionPhase::PreValidate,
            ExecuteError::Invariant { .. } => TransitionPhase::PostValidate,
        }
    }

    /// Name of the action that failed.
    pub fn action(&self) -> &'static str {
        match self {
            ExecuteError::Rejected { action, .. } | ExecuteError::Invariant { action, .. } => action,
        }
    }

    /// True for ordinary guard refusals (stale or concurrent requests).
    pub fn is_rejection(&self) -> bool {
        matches!(self, ExecuteError::Rejected { .. })
    }
}
