// ABOUTME: Pluggable rollback invoked when post-deploy verification fails.
// ABOUTME: The default strategy only reports the intent; no rollback action is defined yet.

use async_trait::async_trait;
use std::fmt;

use crate::output::Reporter;
use crate::stack::StackError;

use super::DeploymentRun;

/// Result of a rollback attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackOutcome {
    /// No strategy is configured; the stack stays as deployed.
    NotConfigured,
    Completed,
    Failed(String),
}

impl fmt::Display for RollbackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollbackOutcome::NotConfigured => write!(f, "rollback not configured"),
            RollbackOutcome::Completed => write!(f, "rolled back"),
            RollbackOutcome::Failed(reason) => write!(f, "rollback failed: {reason}"),
        }
    }
}

/// Action that restores the previous stack after a failed deployment.
#[async_trait]
pub trait RollbackStrategy: Send + Sync {
    fn name(&self) -> &str;

    async fn rollback(
        &self,
        run: &DeploymentRun,
        failure: &StackError,
        reporter: &dyn Reporter,
    ) -> RollbackOutcome;
}

/// Reports that a rollback is needed and does nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRollback;

#[async_trait]
impl RollbackStrategy for NoRollback {
    fn name(&self) -> &str {
        "none"
    }

    async fn rollback(
        &self,
        run: &DeploymentRun,
        failure: &StackError,
        reporter: &dyn Reporter,
    ) -> RollbackOutcome {
        reporter.progress("  → Attempting rollback...");
        tracing::warn!(
            host_id = %run.host_id(),
            container = ?failure.container().map(|c| c.as_str()),
            "rollback requested but no rollback strategy is configured"
        );
        reporter.warning("no rollback strategy configured; stack left as deployed");
        RollbackOutcome::NotConfigured
    }
}
