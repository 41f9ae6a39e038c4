// ABOUTME: Error types for deployment pipeline steps.
// ABOUTME: One variant per fatal step; verification failure carries the rollback outcome.

use crate::provider::HostHealthError;
use crate::stack::StackError;
use crate::types::ContainerName;

use super::rollback::RollbackOutcome;

/// Fatal failures that abort the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Step 1: host unreachable or not active. Nothing was changed.
    #[error("host health check failed: {0}")]
    HostUnhealthy(#[source] HostHealthError),

    /// Step 3: pull failed. The running stack is untouched.
    #[error("failed to pull images: {0}")]
    PullFailed(#[source] StackError),

    /// Step 4: recreate failed. The stack may be partially recreated.
    #[error("failed to restart services: {0}")]
    RestartFailed(#[source] StackError),

    /// Step 5: the new stack did not come up.
    #[error("deployment verification failed: {source} ({rollback})")]
    VerificationFailed {
        #[source]
        source: StackError,
        rollback: RollbackOutcome,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    HostUnhealthy,
    PullFailed,
    RestartFailed,
    VerificationFailed,
}

impl DeployError {
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::HostUnhealthy(_) => DeployErrorKind::HostUnhealthy,
            DeployError::PullFailed(_) => DeployErrorKind::PullFailed,
            DeployError::RestartFailed(_) => DeployErrorKind::RestartFailed,
            DeployError::VerificationFailed { .. } => DeployErrorKind::VerificationFailed,
        }
    }

    /// Whether the failure happened after the stack was changed.
    pub fn stack_modified(&self) -> bool {
        matches!(
            self,
            DeployError::RestartFailed(_) | DeployError::VerificationFailed { .. }
        )
    }

    /// Container that failed verification, if that is what went wrong.
    pub fn failed_container(&self) -> Option<&ContainerName> {
        match self {
            DeployError::VerificationFailed { source, .. } => source.container(),
            _ => None,
        }
    }
}
