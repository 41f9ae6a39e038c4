// ABOUTME: Deployment orchestration using the type state pattern.
// ABOUTME: Exports state markers, the Deployment struct and the pipeline driver.

mod deployment;
mod error;
mod pipeline;
mod rollback;
mod state;
mod transitions;

pub use deployment::{Deployment, DeploymentRun, Step, StepOutcome, StepRecord};
pub use error::{DeployError, DeployErrorKind};
pub use pipeline::{Failure, Outcome, Pipeline, Report, SETTLE_DELAY};
pub use rollback::{NoRollback, RollbackOutcome, RollbackStrategy};
pub use state::{HostVerified, ImagesPulled, Initialized, Inspected, Restarted, Verified};
pub use transitions::TransitionResult;
