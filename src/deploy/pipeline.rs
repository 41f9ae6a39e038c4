// ABOUTME: Deployment pipeline driver: runs the gated steps in order.
// ABOUTME: Owns the dry-run exit, the settle delay and the post-deploy escalation.

use chrono::{DateTime, Local};
use std::time::Duration;

use crate::diagnostics::Diagnostics;
use crate::output::Reporter;
use crate::provider::HostProvider;
use crate::stack::{CommandRunner, StackManager};

use super::deployment::{Deployment, DeploymentRun};
use super::error::DeployError;
use super::rollback::{NoRollback, RollbackStrategy};
use super::state::Initialized;

/// Wait after recreating the stack before checking it again.
pub const SETTLE_DELAY: Duration = Duration::from_secs(10);

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Deployed,
    DryRun,
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct Report {
    pub outcome: Outcome,
    pub run: DeploymentRun,
    pub finished_at: DateTime<Local>,
}

/// A run that stopped on a fatal step.
///
/// Keeps the run record so callers can still show which steps passed and
/// which one failed.
#[derive(Debug)]
pub struct Failure {
    pub run: DeploymentRun,
    pub error: DeployError,
}

impl<S> From<(Deployment<S>, DeployError)> for Failure {
    fn from((deployment, error): (Deployment<S>, DeployError)) -> Self {
        Failure {
            run: deployment.into_run(),
            error,
        }
    }
}

/// The host prober, stack manager and rollback strategy wired together.
pub struct Pipeline<P, R> {
    provider: P,
    stack: StackManager<R>,
    rollback: Box<dyn RollbackStrategy>,
}

impl<P: HostProvider, R: CommandRunner> Pipeline<P, R> {
    pub fn new(provider: P, stack: StackManager<R>) -> Self {
        Self {
            provider,
            stack,
            rollback: Box::new(NoRollback),
        }
    }

    /// Replace the strategy invoked when post-deploy verification fails.
    pub fn with_rollback(mut self, strategy: Box<dyn RollbackStrategy>) -> Self {
        self.rollback = strategy;
        self
    }

    pub fn stack(&self) -> &StackManager<R> {
        &self.stack
    }

    /// Run every step in order.
    ///
    /// Step 1, 3, 4 and 5 failures are fatal and returned as a `Failure`.
    /// A step 2 failure is recorded in `diag` and the run continues. In
    /// dry-run mode the run stops after step 2 without changing anything.
    pub async fn run(
        &self,
        deployment: Deployment<Initialized>,
        reporter: &dyn Reporter,
        diag: &mut Diagnostics,
    ) -> Result<Report, Failure> {
        let dry_run = deployment.is_dry_run();
        if dry_run {
            reporter.progress("Dry run: no changes will be made");
        }
        tracing::info!(host_id = %deployment.host_id(), dry_run, "starting deployment");

        let deployment = deployment.verify_host(&self.provider, reporter).await?;
        let deployment = deployment.inspect_stack(&self.stack, reporter, diag).await;

        if dry_run {
            let run = deployment.finish_dry_run(reporter);
            return Ok(Report {
                outcome: Outcome::DryRun,
                run,
                finished_at: Local::now(),
            });
        }

        let deployment = deployment.pull_images(&self.stack, reporter).await?;
        let deployment = deployment.restart_services(&self.stack, reporter).await?;

        let deployment = match deployment.verify(&self.stack, SETTLE_DELAY, reporter).await {
            Ok(d) => d,
            Err((failed, e)) => {
                let (run, rollback) = failed.rollback(self.rollback.as_ref(), &e, reporter).await;
                return Err(Failure {
                    run,
                    error: DeployError::VerificationFailed {
                        source: e,
                        rollback,
                    },
                });
            }
        };

        let run = deployment.finish();
        let finished_at = Local::now();
        tracing::info!(host_id = %run.host_id(), "deployment complete");
        reporter.success(&format!(
            "Deployment completed successfully at {}",
            finished_at.format("%H:%M:%S")
        ));

        Ok(Report {
            outcome: Outcome::Deployed,
            run,
            finished_at,
        })
    }
}
