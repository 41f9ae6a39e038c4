// ABOUTME: State transition methods for the deployment pipeline.
// ABOUTME: Each method consumes self and returns the next state on success.

use std::marker::PhantomData;
use std::time::Duration;

use crate::diagnostics::{Diagnostics, Warning};
use crate::output::Reporter;
use crate::provider::{HostProvider, probe_host};
use crate::stack::{CommandRunner, StackError, StackManager};

use super::deployment::{Deployment, DeploymentRun, Step, StepOutcome};
use super::error::DeployError;
use super::rollback::{RollbackOutcome, RollbackStrategy};
use super::state::{HostVerified, ImagesPulled, Initialized, Inspected, Restarted, Verified};

/// Transition result that hands the deployment back with the error.
pub type TransitionResult<T, S, E = DeployError> = Result<Deployment<T>, (Deployment<S>, E)>;

// =============================================================================
// Internal Helpers
// =============================================================================

impl<S> Deployment<S> {
    /// Internal helper to transition to a new state.
    fn transition<T>(self) -> Deployment<T> {
        Deployment {
            run: self.run,
            _state: PhantomData,
        }
    }

    fn begin(&self, step: Step, reporter: &dyn Reporter) {
        tracing::info!(step = step.number(), "{}", step.title());
        reporter.step(step.number(), step.title());
    }
}

// =============================================================================
// Initialized -> HostVerified
// =============================================================================

impl Deployment<Initialized> {
    /// Step 1: require the target host to be reachable and `active`.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::HostUnhealthy` on any provider error or
    /// non-active status. No container operation has run at that point.
    pub async fn verify_host<P: HostProvider + ?Sized>(
        mut self,
        provider: &P,
        reporter: &dyn Reporter,
    ) -> TransitionResult<HostVerified, Initialized> {
        self.begin(Step::HostHealth, reporter);

        match probe_host(provider, self.host_id(), reporter).await {
            Ok(host) => {
                self.run.host = Some(host);
                self.run.record(Step::HostHealth, StepOutcome::Passed);
                Ok(self.transition())
            }
            Err(e) => {
                self.run
                    .record(Step::HostHealth, StepOutcome::Failed(e.to_string()));
                Err((self, DeployError::HostUnhealthy(e)))
            }
        }
    }
}

// =============================================================================
// HostVerified -> Inspected
// =============================================================================

impl Deployment<HostVerified> {
    /// Step 2: check the containers that are running now.
    ///
    /// A failure is recorded as a warning and never stops the pipeline: an
    /// unhealthy stack is what the deployment is meant to fix.
    pub async fn inspect_stack<R: CommandRunner>(
        mut self,
        stack: &StackManager<R>,
        reporter: &dyn Reporter,
        diag: &mut Diagnostics,
    ) -> Deployment<Inspected> {
        self.begin(Step::CurrentHealth, reporter);

        match stack.check_health(reporter).await {
            Ok(()) => {
                self.run.record(Step::CurrentHealth, StepOutcome::Passed);
            }
            Err(e) => {
                let message = format!("current stack is unhealthy: {e}");
                reporter.warning(&message);
                diag.warn(Warning::pre_deploy_health(message));
                self.run
                    .record(Step::CurrentHealth, StepOutcome::Warned(e.to_string()));
            }
        }

        self.transition()
    }
}

// =============================================================================
// Inspected -> (dry-run exit) | ImagesPulled
// =============================================================================

impl Deployment<Inspected> {
    /// Stop here without changing anything.
    pub fn finish_dry_run(self, reporter: &dyn Reporter) -> DeploymentRun {
        tracing::info!(host_id = %self.host_id(), "dry run complete, no changes made");
        reporter.success("Dry run complete: no changes were made");
        self.run
    }

    /// Step 3: pull newer images for the whole stack.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::PullFailed`; the running stack is untouched.
    pub async fn pull_images<R: CommandRunner>(
        mut self,
        stack: &StackManager<R>,
        reporter: &dyn Reporter,
    ) -> TransitionResult<ImagesPulled, Inspected> {
        self.begin(Step::PullImages, reporter);

        match stack.pull_images(reporter).await {
            Ok(()) => {
                self.run.record(Step::PullImages, StepOutcome::Passed);
                Ok(self.transition())
            }
            Err(e) => {
                self.run
                    .record(Step::PullImages, StepOutcome::Failed(e.to_string()));
                Err((self, DeployError::PullFailed(e)))
            }
        }
    }
}

// =============================================================================
// ImagesPulled -> Restarted
// =============================================================================

impl Deployment<ImagesPulled> {
    /// Step 4: force-recreate every service container.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::RestartFailed`. The stack may be partially
    /// recreated; no recovery is attempted.
    pub async fn restart_services<R: CommandRunner>(
        mut self,
        stack: &StackManager<R>,
        reporter: &dyn Reporter,
    ) -> TransitionResult<Restarted, ImagesPulled> {
        self.begin(Step::RestartServices, reporter);

        match stack.restart_services(reporter).await {
            Ok(()) => {
                self.run.record(Step::RestartServices, StepOutcome::Passed);
                Ok(self.transition())
            }
            Err(e) => {
                self.run
                    .record(Step::RestartServices, StepOutcome::Failed(e.to_string()));
                Err((self, DeployError::RestartFailed(e)))
            }
        }
    }
}

// =============================================================================
// Restarted -> Verified
// =============================================================================

impl Deployment<Restarted> {
    /// Step 5: wait `settle_delay`, then require every container to be running.
    ///
    /// On failure the deployment is handed back so the caller can roll back.
    pub async fn verify<R: CommandRunner>(
        mut self,
        stack: &StackManager<R>,
        settle_delay: Duration,
        reporter: &dyn Reporter,
    ) -> TransitionResult<Verified, Restarted, StackError> {
        self.begin(Step::Verify, reporter);

        reporter.progress(&format!(
            "  → Waiting {}s for services to settle...",
            settle_delay.as_secs()
        ));
        tokio::time::sleep(settle_delay).await;

        match stack.check_health(reporter).await {
            Ok(()) => {
                self.run.record(Step::Verify, StepOutcome::Passed);
                Ok(self.transition())
            }
            Err(e) => {
                tracing::error!(error = %e, "post-deploy verification failed");
                reporter.error(&format!("Deployment failed: {e}"));
                self.run
                    .record(Step::Verify, StepOutcome::Failed(e.to_string()));
                Err((self, e))
            }
        }
    }

    /// Hand the failed deployment to the rollback strategy.
    pub async fn rollback(
        self,
        strategy: &dyn RollbackStrategy,
        failure: &StackError,
        reporter: &dyn Reporter,
    ) -> (DeploymentRun, RollbackOutcome) {
        tracing::warn!(strategy = strategy.name(), "rolling back");
        let outcome = strategy.rollback(&self.run, failure, reporter).await;
        (self.run, outcome)
    }
}

// =============================================================================
// Verified -> done
// =============================================================================

impl Deployment<Verified> {
    /// Finish the deployment and return the run record.
    pub fn finish(self) -> DeploymentRun {
        self.run
    }
}
